use std::collections::HashMap;
use std::sync::Arc;

use tera::Value;

use super::{str_arg, FuncMap, Helper};
use crate::i18n::Translator;

/// `t`, `set_lang` and `current_lang`, bound to one translator.
pub fn i18n_funcs(translator: &Arc<Translator>) -> FuncMap {
    let mut funcs = FuncMap::new();

    let tr = Arc::clone(translator);
    funcs.insert(
        "t".to_string(),
        Helper::new(
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                let key = str_arg("t", args, "key")?;
                let params = match args.get("args") {
                    Some(Value::Array(values)) => values.clone(),
                    Some(Value::Null) | None => Vec::new(),
                    Some(single) => vec![single.clone()],
                };
                let message = match args.get("lang").and_then(Value::as_str) {
                    Some(lang) => tr.translate_in(lang, key, &params),
                    None => tr.translate(key, &params),
                };
                Ok(Value::String(message))
            },
        ),
    );

    let tr = Arc::clone(translator);
    funcs.insert(
        "set_lang".to_string(),
        Helper::new(
            move |args: &HashMap<String, Value>| -> tera::Result<Value> {
                tr.set_language(str_arg("set_lang", args, "lang")?);
                Ok(Value::String(String::new()))
            },
        ),
    );

    let tr = Arc::clone(translator);
    funcs.insert(
        "current_lang".to_string(),
        Helper::new(move |_: &HashMap<String, Value>| -> tera::Result<Value> {
            Ok(Value::String(tr.current_language()))
        }),
    );

    funcs
}
