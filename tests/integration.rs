use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::json;
use velvet::config::load_config;
use velvet::config::options::{
    with_asset_dir, with_asset_version, with_default_layout, with_delimiters, with_development,
    with_funcs, with_template_dir,
};
use velvet::{
    EngineBuilder, FuncMap, Helper, HtmlEngine, RenderRequest, TemplateConfig, TemplateEngine,
    VelvetError, CONTENT_TEMPLATE,
};

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn site_engine(extra: Vec<velvet::ConfigOption>) -> HtmlEngine {
    let mut options = vec![with_template_dir(fixture_path("site"))];
    options.extend(extra);
    EngineBuilder::new("*.html", options).build().unwrap()
}

fn render(engine: &HtmlEngine, name: &str, data: &impl Serialize) -> String {
    let mut out = Vec::new();
    engine.render(&mut out, name, data).unwrap();
    String::from_utf8(out).unwrap()
}

fn render_layout(engine: &HtmlEngine, request: &RenderRequest<serde_json::Value>) -> String {
    let mut out = Vec::new();
    engine.render_with_layout(&mut out, request).unwrap();
    String::from_utf8(out).unwrap()
}

#[derive(Serialize)]
struct Greeting {
    #[serde(rename = "Name")]
    name: String,
}

#[test]
fn test_render_greeting() {
    let engine = site_engine(vec![]);
    let data = Greeting {
        name: "Ada".to_string(),
    };
    assert_eq!(render(&engine, "greet.html", &data), "Hello, Ada!");
}

#[test]
fn test_render_missing_template() {
    let engine = site_engine(vec![]);
    let mut out = Vec::new();

    let err = engine.render(&mut out, "missing.html", &()).unwrap_err();

    assert!(matches!(err, VelvetError::TemplateNotFound { ref name } if name == "missing.html"));
    assert_eq!(err.to_string(), "Template missing.html not found");
    assert!(out.is_empty());
}

#[test]
fn test_every_matched_file_is_queryable() {
    let engine = site_engine(vec![]);
    for name in ["banner.html", "dict.html", "greet.html", "layout.html", "list.html"] {
        assert!(engine.has_template(name), "{name} should be loaded");
    }
    assert!(!engine.has_template("partials/nav.html"));
    assert_eq!(engine.template_names().len(), 5);
}

#[test]
fn test_recursive_pattern_names_include_directories() {
    let engine = EngineBuilder::new("**/*.html", vec![with_template_dir(fixture_path("site"))])
        .build()
        .unwrap();
    assert!(engine.has_template("partials/nav.html"));
    assert_eq!(render(&engine, "partials/nav.html", &()), "<nav></nav>");
}

#[test]
fn test_zero_matches_fails_construction() {
    let result = EngineBuilder::new("*.tmpl", vec![with_template_dir(fixture_path("site"))]).build();
    assert!(matches!(result, Err(VelvetError::NoTemplatesMatched { .. })));
}

#[test]
fn test_missing_template_dir_fails_construction() {
    let result = EngineBuilder::new("*.html", vec![with_template_dir(fixture_path("nope"))]).build();
    assert!(matches!(result, Err(VelvetError::TemplateDirMissing { .. })));
}

#[test]
fn test_autoescape_and_safe_html() {
    let engine = site_engine(vec![]);
    let out = render(&engine, "banner.html", &json!({"banner": "<em>hi</em>"}));
    assert_eq!(out, "<em>hi</em>|&lt;em&gt;hi&lt;&#x2F;em&gt;");
}

#[test]
fn test_autoescape_applies_to_any_extension() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.tmpl"), "<p>{{ x }}</p>").unwrap();
    fs::write(dir.path().join("raw.tmpl"), "{{ safe_html(value=x) }}").unwrap();
    let engine = EngineBuilder::new("*.tmpl", vec![with_template_dir(dir.path())])
        .build()
        .unwrap();

    let data = json!({"x": "<script>alert(1)</script>"});
    assert_eq!(
        render(&engine, "page.tmpl", &data),
        "<p>&lt;script&gt;alert(1)&lt;&#x2F;script&gt;</p>"
    );
    assert_eq!(render(&engine, "raw.tmpl", &data), "<script>alert(1)</script>");
}

#[test]
fn test_dict_helper() {
    let engine = site_engine(vec![]);
    assert_eq!(render(&engine, "dict.html", &json!({"Name": "Ada"})), "Ada (admin)");
}

#[test]
fn test_execution_errors_propagate() {
    let engine = site_engine(vec![]);
    let mut out = Vec::new();
    let err = engine.render(&mut out, "list.html", &json!({})).unwrap_err();
    match err {
        VelvetError::Render { template, .. } => assert_eq!(template, "list.html"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_layout_wraps_view() {
    let engine = site_engine(vec![with_asset_version("7")]);
    let request = RenderRequest::new("greet.html", json!({"Name": "Ada"})).layout("layout.html");

    assert_eq!(
        render_layout(&engine, &request),
        "<html><head><link rel=\"stylesheet\" href=\"assets/site.css?v=7\"></head>\
         <body>Hello, Ada!</body></html>"
    );
}

#[test]
fn test_default_layout_matches_explicit_layout() {
    let engine = site_engine(vec![with_default_layout("layout.html")]);
    let data = json!({"Name": "Ada"});

    let implicit = render_layout(&engine, &RenderRequest::new("greet.html", data.clone()));
    let empty = render_layout(
        &engine,
        &RenderRequest::new("greet.html", data.clone()).layout(""),
    );
    let explicit = render_layout(
        &engine,
        &RenderRequest::new("greet.html", data).layout("layout.html"),
    );

    assert_eq!(implicit, explicit);
    assert_eq!(empty, explicit);
    assert!(explicit.contains("<body>Hello, Ada!</body>"));
}

#[test]
fn test_layout_does_not_leak_content_template() {
    let engine = site_engine(vec![]);
    let before = engine.template_names();

    let request = RenderRequest::new("greet.html", json!({"Name": "Ada"})).layout("layout.html");
    render_layout(&engine, &request);
    render_layout(&engine, &request);

    assert_eq!(engine.template_names(), before);
    assert!(!engine.has_template(CONTENT_TEMPLATE));
}

#[test]
fn test_layout_unknown_layout() {
    let engine = site_engine(vec![]);
    let request = RenderRequest::new("greet.html", json!({})).layout("base.html");
    let err = engine.render_with_layout(&mut Vec::new(), &request).unwrap_err();
    assert!(matches!(err, VelvetError::TemplateNotFound { name } if name == "base.html"));
}

#[test]
fn test_caller_functions_override_builtins() {
    let mut funcs = FuncMap::new();
    funcs.insert(
        "asset".to_string(),
        Helper::new(
            |args: &HashMap<String, serde_json::Value>| -> tera::Result<serde_json::Value> {
                let name = args.get("name").and_then(|v| v.as_str()).unwrap_or_default();
                Ok(json!(format!("https://cdn.example.com/{name}")))
            },
        ),
    );
    let engine = site_engine(vec![with_funcs(funcs)]);

    let request = RenderRequest::new("greet.html", json!({"Name": "Ada"})).layout("layout.html");
    let out = render_layout(&engine, &request);
    assert!(out.contains("https:&#x2F;&#x2F;cdn.example.com&#x2F;site.css"));
}

#[test]
fn test_asset_dir_option() {
    let engine = site_engine(vec![with_asset_dir("/static")]);
    let request = RenderRequest::new("greet.html", json!({"Name": "Ada"})).layout("layout.html");
    assert!(render_layout(&engine, &request).contains("href=\"/static/site.css\""));
}

#[test]
fn test_empty_asset_dir_disables_asset_helper() {
    let engine = site_engine(vec![with_asset_dir("")]);
    let request = RenderRequest::new("greet.html", json!({"Name": "Ada"})).layout("layout.html");

    let err = engine
        .render_with_layout(&mut Vec::new(), &request)
        .unwrap_err();
    assert!(matches!(err, VelvetError::Render { ref template, .. } if template == "layout.html"));
}

#[test]
fn test_partial_stub_renders_empty() {
    let engine = EngineBuilder::new("**/*.html", vec![with_template_dir(fixture_path("site"))])
        .build()
        .unwrap();
    assert_eq!(render(&engine, "partials/nav.html", &()), "<nav></nav>");
}

#[test]
fn test_custom_delimiters() {
    let engine = EngineBuilder::new(
        "*.html",
        vec![
            with_template_dir(fixture_path("brackets")),
            with_delimiters("[[", "]]"),
        ],
    )
    .build()
    .unwrap();

    let out = render(&engine, "page.html", &json!({"title": "Docs", "items": [1, 2, 3]}));
    assert_eq!(
        out,
        "<h1>Docs</h1><p>3 items</p><code>{{ not_a_tag }}</code>"
    );
}

#[test]
fn test_i18n_from_config_file() {
    let file = load_config(&fixture_path("i18n")).unwrap();
    let engine = EngineBuilder::new("*.html", file.into_options()).build().unwrap();

    let out = render(&engine, "home.html", &json!({"Name": "Ada"}));
    assert_eq!(out, "<p>Welcome, Ada!</p><p>Goodbye</p><p>missing</p>");

    let mut out = Vec::new();
    engine
        .render_in(&mut out, "home.html", &json!({"Name": "Ada"}), Some("de"))
        .unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "<p>Willkommen, Ada!</p><p>Auf Wiedersehen</p><p>missing</p>"
    );

    // The per-render language does not stick.
    assert_eq!(render(&engine, "lang.html", &()), "en");
}

#[test]
fn test_set_lang_persists_across_renders() {
    let file = load_config(&fixture_path("i18n")).unwrap();
    let engine = EngineBuilder::new("*.html", file.into_options()).build().unwrap();

    assert_eq!(render(&engine, "switch.html", &json!({"to": "de"})), "de");
    for _ in 0..3 {
        assert_eq!(render(&engine, "lang.html", &()), "de");
    }
    assert_eq!(
        render(&engine, "home.html", &json!({"Name": "Ada"})),
        "<p>Willkommen, Ada!</p><p>Auf Wiedersehen</p><p>missing</p>"
    );
}

#[test]
fn test_set_lang_inside_scoped_render_stays_scoped() {
    let file = load_config(&fixture_path("i18n")).unwrap();
    let engine = EngineBuilder::new("*.html", file.into_options()).build().unwrap();

    let request = RenderRequest::new("switch.html", json!({"to": "de"})).lang("fr");
    assert_eq!(render_layout(&engine, &request), "de");
    assert_eq!(render(&engine, "lang.html", &()), "en");
}

#[test]
fn test_static_mode_ignores_disk_changes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), "first").unwrap();
    let engine = EngineBuilder::new("*.html", vec![with_template_dir(dir.path())])
        .build()
        .unwrap();
    let names = engine.template_names();

    fs::write(dir.path().join("a.html"), "second").unwrap();
    fs::write(dir.path().join("b.html"), "new").unwrap();

    assert_eq!(engine.template_names(), names);
    assert_eq!(render(&engine, "a.html", &()), "first");
    assert!(!engine.has_template("b.html"));
}

#[test]
fn test_development_mode_picks_up_changes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), "first").unwrap();
    let engine = EngineBuilder::new(
        "*.html",
        vec![with_template_dir(dir.path()), with_development(true)],
    )
    .build()
    .unwrap();

    fs::write(dir.path().join("a.html"), "second").unwrap();
    fs::write(dir.path().join("b.html"), "new").unwrap();

    assert_eq!(render(&engine, "a.html", &()), "second");
    assert_eq!(render(&engine, "b.html", &()), "new");
    assert!(engine.has_template("b.html"));
}

#[test]
fn test_development_reload_failure_keeps_previous_set() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), "first").unwrap();
    let engine = EngineBuilder::new(
        "*.html",
        vec![with_template_dir(dir.path()), with_development(true)],
    )
    .build()
    .unwrap();

    fs::write(dir.path().join("a.html"), "{% for %}").unwrap();
    let err = engine.render(&mut Vec::new(), "a.html", &()).unwrap_err();
    assert!(matches!(err, VelvetError::ReloadFailed { .. }));
    assert_eq!(engine.template_names(), ["a.html"]);

    fs::write(dir.path().join("a.html"), "fixed").unwrap();
    assert_eq!(render(&engine, "a.html", &()), "fixed");
}

#[test]
fn test_empty_template_loads_and_renders_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.html"), "hi").unwrap();
    fs::write(dir.path().join("footer.html"), "").unwrap();

    let engine = EngineBuilder::new("*.html", vec![with_template_dir(dir.path())])
        .build()
        .unwrap();
    assert!(engine.has_template("footer.html"));
    assert_eq!(render(&engine, "footer.html", &()), "");
    assert_eq!(render(&engine, "page.html", &()), "hi");
}

#[test]
fn test_blanking_a_file_in_development_mode() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("page.html"), "hi").unwrap();
    fs::write(dir.path().join("footer.html"), "<footer></footer>").unwrap();
    let engine = EngineBuilder::new(
        "*.html",
        vec![with_template_dir(dir.path()), with_development(true)],
    )
    .build()
    .unwrap();

    fs::write(dir.path().join("footer.html"), "").unwrap();
    assert_eq!(render(&engine, "footer.html", &()), "");
    assert_eq!(render(&engine, "page.html", &()), "hi");
}

#[test]
fn test_parse_error_fails_construction() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.html"), "{{ unclosed").unwrap();

    let result = EngineBuilder::new("*.html", vec![with_template_dir(dir.path())]).build();
    assert!(matches!(result, Err(VelvetError::Parse { .. })));
}

#[test]
fn test_concurrent_renders() {
    let engine = Arc::new(site_engine(vec![]));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let name = format!("user{i}");
                let out = render(&engine, "greet.html", &json!({ "Name": name }));
                assert_eq!(out, format!("Hello, user{i}!"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_renders_during_development_reloads() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("greet.html"), "Hello, {{ Name }}!").unwrap();
    fs::write(dir.path().join("other.html"), "other").unwrap();
    let engine = Arc::new(
        EngineBuilder::new(
            "*.html",
            vec![with_template_dir(dir.path()), with_development(true)],
        )
        .build()
        .unwrap(),
    );

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                for round in 0..10 {
                    let name = format!("user{i}-{round}");
                    let out = render(&engine, "greet.html", &json!({ "Name": name }));
                    assert_eq!(out, format!("Hello, {name}!"));
                    assert!(engine.has_template("other.html"));
                    assert_eq!(engine.template_names(), ["greet.html", "other.html"]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_factory_trait() {
    let builder = EngineBuilder::new("*.html", vec![with_template_dir(fixture_path("site"))]);
    let engine = builder.create_engine().unwrap();

    let mut out = Vec::new();
    engine
        .render(&mut out, "greet.html", &json!({"Name": "Ada"}))
        .unwrap();
    assert_eq!(out, b"Hello, Ada!");
}
