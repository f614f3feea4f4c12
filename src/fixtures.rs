#[cfg(test)]
pub mod test {
    use serde::Serialize;

    /// Key=value file shared by the adapter and store tests.
    pub const DOTENV: &str = "\
# settings used by the test suite
DEBUG=true
MAX_LINES=10
TEMPERATURE=98.2
TRICKY=This is a string with = sign
FOO=1.0 starts with float
BAR=Has newline \\n
";

    /// Baseline defaults, the way an application declares them in code.
    #[derive(Serialize, Debug)]
    #[allow(non_snake_case)]
    pub struct BaseConfig {
        pub DEBUG: bool,
    }

    #[derive(Serialize, Debug)]
    #[allow(non_snake_case)]
    pub struct DevConfig {
        pub DEBUG: bool,
        pub TESTING: bool,
        pub FOO: String,
        pub BAR: Option<String>,
        /// Not upper-case, so skipped by the default key filter.
        pub secret_key: String,
    }

    impl Default for DevConfig {
        fn default() -> Self {
            Self {
                DEBUG: true,
                TESTING: false,
                FOO: "BAZ".into(),
                BAR: None,
                secret_key: "hunter2".into(),
            }
        }
    }

    /// Flat TOML document with one value of every supported kind.
    pub const TOML: &str = r#"
DEBUG = true
MAX_LINES = 10
TEMPERATURE = 98.2
NAME = "10"
STARTED = 1979-05-27T07:32:00Z
"#;

    #[test]
    fn dev_config_serializes_flat() {
        let json = serde_json::to_value(DevConfig::default()).unwrap();
        assert_eq!(json["FOO"], "BAZ");
        assert!(json["BAR"].is_null());
    }
}
