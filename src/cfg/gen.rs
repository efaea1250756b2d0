macro_rules! _def_sections {
    {
        $(
            $(#[$meta:meta])*
            $type_name:ident {
                $($field:ident: $type:ty = $default:expr,)*
            }
        )*
    } => {
        $(
            $(#[$meta])*
            #[derive(Clone, Debug)]
            pub struct $type_name {
                $(pub $field: $type,)*
            }

            impl $type_name {
                const FIELD_NAMES: &'static [&'static str] = &[
                    $(std::stringify!($field),)*
                ];

                fn find_similar(to: &str) -> Option<&'static str> {
                    crate::cfg::parse::most_similar(to, Self::FIELD_NAMES.iter().cloned())
                }
            }

            impl std::default::Default for $type_name {
                fn default() -> Self {
                    use crate::cfg::{parse::Value, scanner::Scanner};
                    Self {
                        $(
                            $field: <$type>::parse(&mut Scanner::new($default))
                                .unwrap_or_else(|e| panic!(
                                    "invalid default value for {}::{}: {}",
                                    std::stringify!($type_name),
                                    std::stringify!($field),
                                    e
                                )),
                        )*
                    }
                }
            }

            impl crate::cfg::parse::Section for $type_name {
                fn set(
                    &mut self,
                    section_name: &str,
                    field: &str,
                    scanner: &mut crate::cfg::scanner::Scanner,
                ) -> crate::cfg::parse::SetResult {
                    use crate::cfg::{error::Error, parse::{Value, SetError}};
                    match field {
                        $(
                            std::stringify!($field) => self.$field = <$type>::parse(scanner)
                                .map_err(SetError::InvalidValue)?,
                        )*
                        _ => {
                            let mut err = Error::new(format!(
                                "no field `{field}` in section `{section_name}`"
                            ));
                            // label span is set by parser
                            err = match Self::find_similar(field) {
                                Some(similar) => err.with_label(0..0, format!(
                                    "help: a field with a similar name exists: `{similar}`"
                                )),
                                None => err.with_label(0..0, "unknown field"),
                            };
                            return Err(SetError::InvalidKey(err));
                        }
                    }
                    Ok(())
                }
            }
        )*
    }
}

macro_rules! _def_document {
    {$doc_name:ident { $($ident:ident: $type:ty => $section_name:expr,)* }} => {
        #[derive(Clone, Debug, Default)]
        pub struct $doc_name {
            $(pub $ident: $type,)*
        }

        impl $doc_name {
            const SECTION_NAMES: &'static [&'static str] = &[$($section_name,)*];

            fn find_similar(to: &str) -> Option<&'static str> {
                crate::cfg::parse::most_similar(to, Self::SECTION_NAMES.iter().cloned())
            }
        }

        impl crate::cfg::parse::Document for $doc_name {
            fn section(
                &mut self,
                name: &str,
            ) -> Result<&mut dyn crate::cfg::parse::Section, crate::cfg::error::Error> {
                use crate::cfg::error::Error;
                match name {
                    $($section_name => Ok(&mut self.$ident),)*
                    _ => {
                        // error line and label span are set by parser
                        let err = Error::new(format!("no such section: `{name}`"));
                        Err(match Self::find_similar(name) {
                            Some(similar) => err.with_label(0..0, format!(
                                "help: a section with a similar name exists: `{similar}`"
                            )),
                            None => err.with_label(0..0, "unknown section"),
                        })
                    }
                }
            }
        }
    }
}

/// Defines a document type implementing `Document` together with the section
/// types it consists of, which implement `Section` and `Default`.
///
/// ```ignore
/// parsed_config! {
///     sections => {
///         // `Type` has to implement `Value`; the default is parsed with it.
///         SectionName {
///             field: Type = "default_value",
///         }
///     }
///     // `[section_name]` in the file sets `document.field_name`.
///     document => DocumentName {
///         field_name: SectionName => "section_name",
///     }
/// }
/// ```
macro_rules! parsed_config {
    {
        sections => {
            $($section_def:tt)*
        }
        document => $doc_name:ident {
            $($ident:ident: $type:ty => $section_name:expr,)*
        }
    } => {
        crate::cfg::gen::_def_sections!($($section_def)*);
        crate::cfg::gen::_def_document!($doc_name { $($ident: $type => $section_name,)* });
    }
}

pub(crate) use _def_document;
pub(crate) use _def_sections;
pub(crate) use parsed_config;
