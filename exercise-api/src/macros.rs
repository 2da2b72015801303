macro_rules! setter {
    ($field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = $field.into();
            self
        }
    };

    ($field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = $subfield.into();
            self
        }
    };

    (opt $field:ident : $ty:ty) => {
        pub fn $field<T>(mut self, $field: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field = std::option::Option::Some($field.into());
            self
        }
    };

    (opt $field:ident . $subfield:ident : $ty:ty) => {
        pub fn $subfield<T>(mut self, $subfield: T) -> Self
        where
            T: Into<$ty>,
        {
            self.$field.$subfield = Some($subfield.into());
            self
        }
    };
}

/// Declares a `u8` newtype restricted to `1..=5`, serialized as a bare integer.
macro_rules! one_to_five {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(try_from = "u8", into = "u8")]
        pub struct $name(u8);

        impl $name {
            pub const MIN: u8 = 1;
            pub const MAX: u8 = 5;

            pub fn new(value: u8) -> Result<Self, $crate::endpoints::ValidationError> {
                if (Self::MIN..=Self::MAX).contains(&value) {
                    Ok(Self(value))
                } else {
                    Err($crate::endpoints::ValidationError::new(format!(
                        "{} must be between {} and {}, got {}",
                        $label,
                        Self::MIN,
                        Self::MAX,
                        value
                    )))
                }
            }

            pub fn inner(&self) -> u8 {
                self.0
            }
        }

        impl TryFrom<u8> for $name {
            type Error = $crate::endpoints::ValidationError;

            fn try_from(value: u8) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u8 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::endpoints::ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s.trim().parse::<u8>().map_err(|_| {
                    $crate::endpoints::ValidationError::new(format!(
                        "{} must be a number, got '{}'",
                        $label, s
                    ))
                })?;
                Self::new(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

pub(crate) use one_to_five;
pub(crate) use setter;
