use std::fmt::{self, Display};

use serde::{de::DeserializeOwned, Serialize};

pub trait ConfigKey: Display {
    type Value: Serialize + DeserializeOwned;

    fn fallback() -> Option<Self::Value>;
}

#[macro_export]
macro_rules! key_derive {
    ($key:ident => $value:ty) => {
        impl $crate::ConfigKey for $key {
            type Value = $value;

            fn fallback() -> Option<Self::Value> {
                None
            }
        }
    };

    ($key:ident => $value:ty|$fallback:expr) => {
        impl $crate::ConfigKey for $key {
            type Value = $value;

            fn fallback() -> Option<Self::Value> {
                Some($fallback)
            }
        }
    };
}

macro_rules! key_name {
    ($key:ident, $name:literal) => {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct $key;

        impl Display for $key {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str($name)
            }
        }
    };
}

key_name!(ApiBaseUrl, "api_base_url");
key_name!(AuthToken, "auth_token");
key_name!(PageStep, "page_step");
key_name!(InitialWindow, "initial_window");

key_derive!(ApiBaseUrl => String|"http://localhost:8000/".to_string());
key_derive!(AuthToken => String);
key_derive!(PageStep => usize|15);
key_derive!(InitialWindow => usize|15);
