//! Integration tests for maui-core's public merge API.

use maui_core::domain::{
    ColorMode, ConfigDocument, ConfigValue, KnownCallables, ThemeBlock, ThemeColor,
    merge_config_source, merge_styles, parse_imports, update_root_tags,
};

const NX_CONFIG: &str = "const { createGlobPatternsForDependencies } = require('@nx/angular/tailwind');
const { join } = require('path');

module.exports = {
  content: [
    join(__dirname, 'src/**/!(*.stories|*.spec).{ts,html}'),
    ...createGlobPatternsForDependencies(__dirname)
  ],
  theme: {
    extend: {}
  },
  plugins: []
};
";

const MAUI_CONFIG: &str = "const { createGlobPatternsForDependencies } = require('@nx/angular/tailwind');
const { join } = require('path');

module.exports = {
  darkMode: 'class',
  presets: [require('@spartan-ng/ui-core/hlm-tailwind-preset')],
  content: [
    join(__dirname, 'src/**/!(*.stories|*.spec).{ts,html}'),
    ...createGlobPatternsForDependencies(__dirname)
  ],
  theme: {
    extend: {}
  },
  plugins: []
};
";

#[test]
fn merging_into_nx_default_config() {
    let known = KnownCallables::default();
    let incoming = ConfigDocument::parse(MAUI_CONFIG, &known).unwrap();

    let merged = merge_config_source(Some(NX_CONFIG), &incoming, &known).unwrap();
    let doc = ConfigDocument::parse(&merged, &known).unwrap();

    let keys: Vec<&str> = doc.body.keys().map(String::as_str).collect();
    assert_eq!(keys, ["darkMode", "presets", "content", "theme", "plugins"]);
    assert_eq!(
        doc.body.get("darkMode"),
        Some(&ConfigValue::String("class".into()))
    );
    assert!(merged.contains("...createGlobPatternsForDependencies(__dirname)"));

    // Headers already match, so the file keeps its own.
    assert!(merged.starts_with(
        "const { createGlobPatternsForDependencies } = require('@nx/angular/tailwind');\n"
    ));
}

#[test]
fn plugins_and_theme_extensions_survive_repeated_merges() {
    let known = KnownCallables::default();
    let existing = "module.exports = {
  theme: {
    extend: {
      colors: { brand: '#123456' },
    },
  },
  plugins: [require('@tailwindcss/typography')],
};
";
    let incoming = ConfigDocument::parse(MAUI_CONFIG, &known).unwrap();

    let once = merge_config_source(Some(existing), &incoming, &known).unwrap();
    let twice = merge_config_source(Some(&once), &incoming, &known).unwrap();
    assert_eq!(once, twice);
    assert!(once.contains("brand: '#123456'"));
    assert!(once.contains("require('@tailwindcss/typography')"));
}

#[test]
fn prettier_style_config_merges_stably() {
    let known = KnownCallables::default();
    let existing = "// Größen und Farben
const { createGlobPatternsForDependencies } = require(\"@nx/angular/tailwind\");
const { join } = require(\"path\");

module.exports = {
  content: [join(__dirname, \"src/**/*.html\")],
  theme: { extend: { spacing: { huge: 1e400 }, fontFamily: { größe: [\"Noto Sans\"] } } },
};
";
    let incoming = ConfigDocument::parse(MAUI_CONFIG, &known).unwrap();

    let once = merge_config_source(Some(existing), &incoming, &known).unwrap();
    let twice = merge_config_source(Some(&once), &incoming, &known).unwrap();
    assert_eq!(once, twice);
    assert!(once.starts_with("// Größen und Farben\n"));
    assert_eq!(once.matches("const { join }").count(), 1);
    assert_eq!(once.matches("const { createGlobPatternsForDependencies }").count(), 1);
    assert!(once.contains("huge: Infinity"));
    assert!(once.contains("'größe': ['Noto Sans']"));
}

#[test]
fn absent_config_is_written_from_incoming() {
    let known = KnownCallables::default();
    let incoming = ConfigDocument::parse(MAUI_CONFIG, &known).unwrap();
    assert_eq!(
        merge_config_source(None, &incoming, &known).unwrap(),
        incoming.render()
    );
    assert_eq!(
        merge_config_source(Some("  \n"), &incoming, &known).unwrap(),
        incoming.render()
    );
}

#[test]
fn restricted_callables_reject_unknown_calls() {
    let known = KnownCallables::new(["join"]);
    let err = ConfigDocument::parse(MAUI_CONFIG, &known).unwrap_err();
    assert!(err.is_merge_failure());
}

#[test]
fn theme_switch_replaces_block_and_root_classes() {
    let imports = parse_imports("@tailwind base;\n\n@tailwind components;\n@tailwind utilities;\n");
    let green = ThemeBlock::new("theme-green", ":root { --primary: green; }");
    let red = ThemeBlock::new("theme-red", ":root { --primary: red; }");

    let styles = merge_styles(None, &imports, &green).unwrap();
    let styles = merge_styles(Some(&styles), &imports, &red).unwrap();
    assert!(styles.contains("/* maui:theme theme-red */"));
    assert!(!styles.contains("theme-green"));
    assert_eq!(styles.matches("@tailwind base;").count(), 1);

    let html = "<html><body></body></html>";
    let html = update_root_tags(html, ColorMode::Dark, ThemeColor::Green);
    let html = update_root_tags(&html, ColorMode::Light, ThemeColor::Red);
    assert_eq!(
        html,
        "<html class=\"h-full scroll-smooth theme-red\"><body class=\"bg-background text-foreground\"></body></html>"
    );
}
