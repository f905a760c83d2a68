use std::path::PathBuf;

use crate::utils::cli::Args;

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub base: String,
    pub workdir: Option<PathBuf>,
    pub body_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            base: "/fs".to_string(),
            workdir: None,
            body_limit: 64 * 1024 * 1024,
        }
    }
}

impl Config {
    /// Checks every argument and reports all problems at once.
    pub fn from_args(args: &Args) -> Result<Config, Vec<String>> {
        let mut validation_errors = Vec::new();

        if !args.base.starts_with('/') || args.base.ends_with('/') {
            validation_errors.push(format!(
                "FSBRIDGE_BASE `{}` must start with `/` and must not end with `/`",
                args.base,
            ));
        } else if args.base == "/host" {
            validation_errors.push("FSBRIDGE_BASE `/host` is reserved".to_string());
        }

        if let Some(dir) = &args.workdir {
            match std::fs::metadata(dir) {
                Ok(meta) => {
                    if !meta.is_dir() {
                        validation_errors.push(format!(
                            "FSBRIDGE_WORKDIR `{}` exists but is not a directory",
                            dir.display(),
                        ));
                    }
                }
                Err(_) => validation_errors.push(format!(
                    "FSBRIDGE_WORKDIR `{}` does not exist",
                    dir.display(),
                )),
            }
        }

        if args.body_limit == 0 {
            validation_errors.push("FSBRIDGE_BODY_LIMIT must be greater than zero".to_string());
        }

        if !validation_errors.is_empty() {
            return Err(validation_errors);
        }

        Ok(Config {
            host: args.host.clone(),
            port: args.port,
            base: args.base.clone(),
            workdir: args.workdir.clone(),
            body_limit: args.body_limit,
        })
    }
}
