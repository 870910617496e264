use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub gem_path: Option<String>,
    pub gem_home: Option<String>,
    #[serde(rename = "lambda_task_root")]
    pub task_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gem_path: None,
            gem_home: None,
            task_root: PathBuf::from("/var/task"),
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Settings::default()))
            // .merge fills in any missing values from the environment
            .merge(Env::raw().only(&["GEM_PATH", "GEM_HOME", "LAMBDA_TASK_ROOT"]))
            .extract()
    }

    /// The first non-empty package root, in precedence order.
    pub fn package_root(&self) -> Option<PathBuf> {
        [&self.gem_path, &self.gem_home]
            .into_iter()
            .flatten()
            .find(|root| !root.is_empty())
            .map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use std::path::Path;

    #[test]
    fn when_env_is_set_should_load_roots_and_task_root() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("GEM_PATH", "/opt/ruby/gems/3.2.0");
            jail.set_env("LAMBDA_TASK_ROOT", "/var/task-override");

            let settings = Settings::load().expect("settings should load");

            assert_eq!(settings.gem_path.as_deref(), Some("/opt/ruby/gems/3.2.0"));
            assert_eq!(settings.task_root, Path::new("/var/task-override"));
            assert_eq!(
                settings.package_root(),
                Some(Path::new("/opt/ruby/gems/3.2.0").to_path_buf())
            );

            Ok(())
        });
    }

    #[test]
    fn when_env_is_empty_should_fall_back_to_defaults() {
        let settings = Settings::default();

        assert_eq!(settings.task_root, Path::new("/var/task"));
        assert_eq!(settings.package_root(), None);
    }

    #[test]
    fn when_gem_path_is_empty_should_fall_back_to_gem_home() {
        let settings = Settings {
            gem_path: Some(String::new()),
            gem_home: Some("/opt/gem-home".to_string()),
            ..Settings::default()
        };

        assert_eq!(
            settings.package_root(),
            Some(Path::new("/opt/gem-home").to_path_buf())
        );
    }
}
