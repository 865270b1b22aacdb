use anyhow::Result;

use crate::config::{config_path, load_config, save_config};

pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("Config file: {}", config_path()?.display());
    println!("Server URL:  {}", config.server.url);
    if config.server.token.is_empty() {
        println!("Auth token:  (not set - run `jobwatch login`)");
    } else {
        // show just enough to confirm which token is stored
        let tail: String = config
            .server
            .token
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        println!("Auth token:  …{tail}");
    }
    Ok(())
}

pub fn set_config(server: Option<String>, token: Option<String>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(server) = server {
        config.server.url = server.trim_end_matches('/').to_string();
        println!("Server URL set to {}", config.server.url);
    }
    if let Some(token) = token {
        config.server.token = token;
        println!("Auth token updated");
    }
    save_config(&config)
}
