//! Translation table used by the `t`, `set_lang` and `current_lang` helpers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{OnceLock, PoisonError, RwLock};

use regex_lite::{Captures, Regex};
use tera::Value;

/// Language tag -> message key -> format string.
pub type Translations = HashMap<String, HashMap<String, String>>;

thread_local! {
    static SCOPED_LANG: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Message catalogue with a shared "current language".
///
/// Lookups are total: an unknown language or key yields the key itself.
#[derive(Debug)]
pub struct Translator {
    default_lang: String,
    translations: Translations,
    current: RwLock<String>,
}

impl Translator {
    pub fn new(default_lang: impl Into<String>, translations: Translations) -> Self {
        let default_lang = default_lang.into();
        Self {
            current: RwLock::new(default_lang.clone()),
            default_lang,
            translations,
        }
    }

    pub fn default_language(&self) -> &str {
        &self.default_lang
    }

    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Translate `key` in the current language, substituting `args` into
    /// `{}` / `{N}` placeholders.
    pub fn translate(&self, key: &str, args: &[Value]) -> String {
        let lang = self.current_language();
        self.translate_in(&lang, key, args)
    }

    /// Translate `key` in an explicit language. An empty `lang` means the
    /// default language.
    pub fn translate_in(&self, lang: &str, key: &str, args: &[Value]) -> String {
        let lang = if lang.is_empty() {
            self.default_lang.as_str()
        } else {
            lang
        };

        let Some(message) = self
            .translations
            .get(lang)
            .and_then(|messages| messages.get(key))
        else {
            return key.to_string();
        };

        if args.is_empty() {
            message.clone()
        } else {
            format_message(message, args)
        }
    }

    /// Set the current language.
    ///
    /// Inside a render that carries its own language only that render is
    /// affected; otherwise the shared language changes.
    pub fn set_language(&self, lang: impl Into<String>) {
        let lang = lang.into();
        let scoped = SCOPED_LANG.with(|scope| {
            let mut scope = scope.borrow_mut();
            match scope.as_mut() {
                Some(current) => {
                    *current = lang.clone();
                    true
                }
                None => false,
            }
        });
        if !scoped {
            *self.current.write().unwrap_or_else(PoisonError::into_inner) = lang;
        }
    }

    pub fn current_language(&self) -> String {
        if let Some(lang) = SCOPED_LANG.with(|scope| scope.borrow().clone()) {
            return lang;
        }
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Restores the previous per-render language when dropped.
#[must_use]
pub(crate) struct LanguageScope {
    previous: Option<String>,
    active: bool,
}

/// Pin the language used by translation helpers on this thread until the
/// returned guard is dropped. `None` leaves the shared language in effect.
pub(crate) fn scope_language(lang: Option<&str>) -> LanguageScope {
    match lang {
        Some(lang) => {
            let previous = SCOPED_LANG.with(|scope| scope.replace(Some(lang.to_string())));
            LanguageScope {
                previous,
                active: true,
            }
        }
        None => LanguageScope {
            previous: None,
            active: false,
        },
    }
}

impl Drop for LanguageScope {
    fn drop(&mut self) {
        if self.active {
            let previous = self.previous.take();
            SCOPED_LANG.with(|scope| *scope.borrow_mut() = previous);
        }
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{(\d*)\}").expect("valid regex"))
}

/// Substitute positional arguments. `{}` takes the next argument in order,
/// `{N}` takes argument N. Placeholders without an argument are kept as-is.
pub fn format_message(message: &str, args: &[Value]) -> String {
    let mut next = 0;
    placeholder_re()
        .replace_all(message, |caps: &Captures<'_>| {
            let index = match caps[1].parse::<usize>() {
                Ok(index) => index,
                Err(_) => {
                    next += 1;
                    next - 1
                }
            };
            match args.get(index) {
                Some(value) => display_value(value),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
