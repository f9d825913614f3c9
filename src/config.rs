// config.rs
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub app_url: String,
    pub frontend_url: String,
    pub jwt_secret: String,
    pub jwt_maxage: i64,
    pub port: u16,
    // Payment gateway configuration
    pub paystack_secret_key: String,
    // Email service configuration
    pub resend_api_key: String,
    pub from_email: String,
    // Image upload configuration
    pub upload_backend: String,
    pub upload_dir: String,
    pub cloud_upload_url: String,
    pub cloud_upload_key: String,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let jwt_secret = std::env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set");
        let jwt_maxage = std::env::var("JWT_MAXAGE").expect("JWT_MAXAGE must be set");
        let app_url = std::env::var("APP_URL").expect("APP_URL must be set");
        let frontend_url = std::env::var("FRONTEND_URL")
            .unwrap_or_else(|_| "http://localhost:5173".to_string());

        let paystack_secret_key = std::env::var("PAYSTACK_SECRET_KEY")
            .unwrap_or_else(|_| "test_secret_key".to_string());

        let resend_api_key = std::env::var("RESEND_API_KEY")
            .unwrap_or_else(|_| "".to_string());
        let from_email = std::env::var("FROM_EMAIL")
            .unwrap_or_else(|_| "Casamart <noreply@casamart.app>".to_string());

        // "local" stores files under upload_dir, "cloud" forwards to the image host
        let upload_backend = std::env::var("UPLOAD_BACKEND")
            .unwrap_or_else(|_| "local".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR")
            .unwrap_or_else(|_| "uploads".to_string());
        let cloud_upload_url = std::env::var("CLOUD_UPLOAD_URL")
            .unwrap_or_else(|_| "".to_string());
        let cloud_upload_key = std::env::var("CLOUD_UPLOAD_KEY")
            .unwrap_or_else(|_| "".to_string());

        Config {
            database_url,
            app_url,
            frontend_url,
            jwt_secret,
            jwt_maxage: jwt_maxage.parse::<i64>().unwrap(),
            port: 8000,
            paystack_secret_key,
            resend_api_key,
            from_email,
            upload_backend,
            upload_dir,
            cloud_upload_url,
            cloud_upload_key,
        }
    }
}
