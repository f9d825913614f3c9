pub mod bannerdb;
pub mod categorydb;
pub mod db;
pub mod productdb;
pub mod propertydb;
pub mod transactiondb;
pub mod userdb;

pub use bannerdb::BannerExt;
pub use categorydb::CategoryExt;
pub use productdb::ProductExt;
pub use propertydb::PropertyExt;
pub use transactiondb::TransactionExt;
pub use userdb::UserExt;
