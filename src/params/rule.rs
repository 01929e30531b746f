/// Declares a set of combinable rule flags that is written as `a | b` in config files.
/// Parsing ignores case and underscores, `none` stands for the empty set.
#[macro_export]
macro_rules! rule_flags {
    ($(#[$meta:meta])* $name:ident { $($flag:ident = $bit:expr, $label:literal;)* }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(u8);

        impl $name {
            pub const NONE: Self = $name(0);
            $(pub const $flag: Self = $name($bit);)*

            pub fn contains(self, other: Self) -> bool {
                self.0 & other.0 == other.0
            }

            pub fn is_empty(self) -> bool {
                self.0 == 0
            }
        }

        impl std::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                $name(self.0 | rhs.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::params::ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut rule = Self::NONE;
                for part in s.split('|') {
                    let key: String = part
                        .trim()
                        .chars()
                        .filter(|c| *c != '_')
                        .collect::<String>()
                        .to_lowercase();
                    if key.is_empty() || key == "none" {
                        continue;
                    }
                    rule = rule | match key.as_str() {
                        $(k if k == $label.replace('_', "") => Self::$flag,)*
                        _ => return Err($crate::params::ConfigError::UnknownRule(part.trim().to_string())),
                    };
                }
                Ok(rule)
            }
        }

        impl std::convert::TryFrom<String> for $name {
            type Error = $crate::params::ConfigError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(rule: $name) -> String {
                rule.to_string()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                let labels: Vec<&str> = vec![$(($name::$flag, $label)),*]
                    .into_iter()
                    .filter(|(flag, _)| self.contains(*flag))
                    .map(|(_, label)| label)
                    .collect();
                if labels.is_empty() {
                    write!(f, "none")
                } else {
                    write!(f, "{}", labels.join(" | "))
                }
            }
        }
    };
}
