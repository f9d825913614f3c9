pub mod bannerdtos;
pub mod categorydtos;
pub mod paymentdtos;
pub mod productdtos;
pub mod propertydtos;
pub mod userdtos;
