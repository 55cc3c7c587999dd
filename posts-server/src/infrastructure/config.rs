pub const DEFAULT_COVER_URL: &str = "https://via.placeholder.com/600";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub bucket_posts: String,
    pub table_posts: String,
    pub cover_url: String,
    pub aws_region: Option<String>,
    pub aws_endpoint_url: Option<String>,
    pub cors_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &str| {
            optional(name).ok_or_else(|| anyhow::anyhow!("{} must be set", name))
        };

        let host = optional("HOST").unwrap_or_else(|| "127.0.0.1".into());
        let port = optional("PORT")
            .unwrap_or_else(|| "8080".into())
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid PORT: {}", e))?;
        let bucket_posts = required("BUCKET_POSTS")?;
        let table_posts = required("TABLE_POSTS")?;
        let cover_url = optional("COVER_URL").unwrap_or_else(|| DEFAULT_COVER_URL.into());
        let cors_origins = optional("CORS_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Ok(Self {
            host,
            port,
            bucket_posts,
            table_posts,
            cover_url,
            aws_region: optional("AWS_REGION"),
            aws_endpoint_url: optional("AWS_ENDPOINT_URL"),
            cors_origins,
        })
    }
}
