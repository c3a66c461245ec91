use config_env::EnvConfig;
use config_keys::{ApiBaseUrl, AuthToken, InitialWindow, PageStep};
use url::Url;

use crate::{projection::window::VisibleWindow, Result};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub token: Option<String>,
}

impl ClientConfig {
    pub fn from_env(env: &EnvConfig) -> Result<Self> {
        let base_url = Url::parse(&env.get(ApiBaseUrl)?)?;
        let token = env.get_opt(AuthToken)?;
        Ok(Self { base_url, token })
    }
}

pub fn window_from_env(env: &EnvConfig) -> Result<VisibleWindow> {
    Ok(VisibleWindow::new(
        env.get(InitialWindow)?,
        env.get(PageStep)?,
    ))
}
