use std::fs;
use std::path::Path;

use quire_core::build_site;
use quire_core::config::SiteConfig;
use tempfile::TempDir;

const INTRO: &str = "\
category: Basics
category_id: basics
title: Introduction
---
#Hello
Welcome to `quire`.
|Pages are plain text.
|Sections split on dashes.

img(images/logo.png)
href(Next page)[pointers.html]
";

const POINTERS: &str = "\
category: Memory
category_id: memory
title: Pointers
---
```
int *p = nullptr;
# not a heading
```
";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup_prototype() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let proto = tmp.path().join("Prototype");
    write(&proto, "index.html", "<body>$menu $table_of_contents</body>");
    write(&proto, "css/site.css", "body { margin: 0 }");
    write(&proto, "_prototype/pages/intro.txt", INTRO);
    write(&proto, "_prototype/pages/pointers.txt", POINTERS);
    write(&proto, "_prototype/templates/head.html", "<meta charset='utf-8'>");
    write(&proto, "_prototype/templates/menu.html", "<nav></nav>");
    tmp
}

fn config_for(tmp: &TempDir) -> SiteConfig {
    SiteConfig {
        prototype: tmp.path().join("Prototype"),
        output: tmp.path().join("Site"),
        ..SiteConfig::default()
    }
}

#[test]
fn builds_pages_and_fills_templates() {
    let tmp = setup_prototype();
    let config = config_for(&tmp);

    let report = build_site(&config).unwrap();
    assert_eq!(report.pages, 2);
    assert_eq!(report.contents_entries, 2);
    assert_eq!(report.copied_entries, 2);
    assert_eq!(report.filled_files, 3);

    let intro = fs::read_to_string(config.output.join("intro.html")).unwrap();
    assert!(intro.starts_with("<!DOCTYPE html>\n<html class = ' '>"));
    assert!(intro.contains("<meta charset='utf-8'> <title class = ' '>Introduction </title>"));
    assert!(intro.contains("<nav></nav> <div class = ' container '>"));
    assert!(intro.contains("<h6 class = ' section-title '>Hello </h6>"));
    assert!(intro.contains("Welcome to  <code class = ' '>quire </code> . "));
    assert!(intro.contains(
        "<div class = ' note '>Pages are plain text.<br>Sections split on dashes.<br> </div>"
    ));
    assert!(intro.contains("<div class = ' img-wrapper '><img src=images/logo.png/> </div>"));
    assert!(intro.contains("<a href=pointers.html class = ' '>Next page </a>"));
    assert!(!intro.contains("category"));

    let pointers = fs::read_to_string(config.output.join("pointers.html")).unwrap();
    assert!(pointers.contains(
        "<pre class = ' code-example '><code class = ' code-example-body cpp '>int *p = nullptr;\n# not a heading\n </code> </pre>"
    ));
    assert!(!pointers.contains("<h6"));
}

#[test]
fn writes_table_of_contents_into_index() {
    let tmp = setup_prototype();
    let config = config_for(&tmp);

    build_site(&config).unwrap();

    let fragment = fs::read_to_string(config.table_of_contents_path()).unwrap();
    assert!(fragment.starts_with("<section class = ' '><ul class = ' table-of-contents '>"));

    let index = fs::read_to_string(config.output.join("index.html")).unwrap();
    assert!(index.contains("<nav></nav>"));
    assert!(index.contains("<span id=basics class = ' list-header '>Basics </span>"));
    assert!(index.contains("<a href=intro.html class = ' '>Introduction </a>"));
    assert!(index.contains("<span id=memory class = ' list-header '>Memory </span>"));
    assert!(!index.contains("$table_of_contents"));
}

#[test]
fn mirrors_assets_but_not_reserved_directory() {
    let tmp = setup_prototype();
    let config = config_for(&tmp);

    build_site(&config).unwrap();

    assert_eq!(
        fs::read_to_string(config.output.join("css/site.css")).unwrap(),
        "body { margin: 0 }"
    );
    assert!(!config.output.join("_prototype").exists());
}

#[test]
fn clears_previous_output() {
    let tmp = setup_prototype();
    let config = config_for(&tmp);
    write(&config.output, "stale.html", "old");

    build_site(&config).unwrap();

    assert!(!config.output.join("stale.html").exists());
}

#[test]
fn malformed_page_aborts_build() {
    let tmp = setup_prototype();
    let config = config_for(&tmp);
    write(
        &config.prototype,
        "_prototype/pages/broken.txt",
        "title: Broken\n---\nimg(unclosed",
    );

    let err = build_site(&config).unwrap_err();
    assert!(err.to_string().contains("broken.txt"));
    assert!(!config.output.join("broken.html").exists());
}
