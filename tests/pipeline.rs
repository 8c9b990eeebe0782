//! End-to-end runs of the declaration stage over the fixture project.

use std::fs;
use std::path::{Path, PathBuf};

use asset_decl::output::Level;
use asset_decl::pipeline::{DECLARATION_STAGE, MANIFEST_STAGE};
use asset_decl::{BuildManifest, MemoryReporter, Pipeline, PipelineConfig, StageConfig};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn copy_dir(from: &Path, to: &Path) {
    fs::create_dir_all(to).unwrap();
    for entry in fs::read_dir(from).unwrap() {
        let entry = entry.unwrap();
        let target = to.join(entry.file_name());
        if entry.file_type().unwrap().is_dir() {
            copy_dir(&entry.path(), &target);
        } else {
            fs::copy(entry.path(), &target).unwrap();
        }
    }
}

/// Copy the fixture project so the manifest can be rewritten.
fn project(declaration: serde_json::Value) -> (TempDir, PipelineConfig) {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("public");
    copy_dir(&fixtures_dir().join("public"), &out);

    let mut stage = StageConfig::new(DECLARATION_STAGE);
    if let serde_json::Value::Object(options) = declaration {
        stage.options = options;
    }
    stage
        .options
        .insert("dist".to_string(), json!(dir.path().join("src/assets.ts")));

    let config = PipelineConfig {
        output: out.clone(),
        stages: vec![
            StageConfig::new(MANIFEST_STAGE).with_option("output", out.join("manifest.json").to_str().unwrap()),
            stage,
        ],
    };
    (dir, config)
}

#[test]
fn test_fixture_declaration() {
    let (dir, config) = project(json!({ "createLoadFunction": false }));
    let reporter = MemoryReporter::new();

    Pipeline::from_config(config).unwrap().finish(&reporter).unwrap();

    let decl = fs::read_to_string(dir.path().join("src/assets.ts")).unwrap();
    assert_eq!(
        decl,
        r#"import { Spritesheet, Texture, Assets, ArrayOr, ProgressCallback } from 'pixi.js';

export type AssetsDeclaration = {
"ui_button_png":any
"ui_icons_star_png":any
"star":any
"sheets_hero_json":{textures:{"hero-idle":Texture,hero_walk_1:Texture,hero_walk_2:Texture}}
"sheets_missing_json":any /* unresolved */
"music_theme_ogg":any
}
"#
    );

    // Only the missing sprite sheet is reported.
    let errors = reporter.messages(Level::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("missing.json"));
}

#[test]
fn test_manifest_rewritten_with_normalized_aliases() {
    let (_dir, config) = project(json!({}));
    let manifest_path = config.output.join("manifest.json");

    Pipeline::from_config(config).unwrap().finish(&MemoryReporter::new()).unwrap();

    let manifest = BuildManifest::load(&manifest_path).unwrap();
    let aliases: Vec<Vec<String>> = manifest.assets().map(|a| a.alias.clone()).collect();
    assert_eq!(
        aliases,
        vec![
            vec!["ui_button_png".to_string()],
            vec!["ui_icons_star_png".to_string(), "star".to_string()],
            vec!["sheets_hero_json".to_string()],
            vec!["sheets_missing_json".to_string()],
            vec!["music_theme_ogg".to_string()],
        ]
    );
    // Sources and tags are untouched.
    assert_eq!(manifest.bundles[1].assets[0].src, vec!["sheets/hero.json"]);
    assert!(manifest.bundles[1].assets[0].has_tag("tps"));
}

#[test]
fn test_second_run_is_stable() {
    let (dir, config) = project(json!({}));
    let manifest_path = config.output.join("manifest.json");
    let pipeline = Pipeline::from_config(config).unwrap();

    pipeline.finish(&MemoryReporter::new()).unwrap();
    let decl_first = fs::read_to_string(dir.path().join("src/assets.ts")).unwrap();
    let manifest_first = fs::read_to_string(&manifest_path).unwrap();

    pipeline.finish(&MemoryReporter::new()).unwrap();
    let decl_second = fs::read_to_string(dir.path().join("src/assets.ts")).unwrap();
    let manifest_second = fs::read_to_string(&manifest_path).unwrap();

    assert_eq!(decl_first, decl_second);
    assert_eq!(manifest_first, manifest_second);
}

#[test]
fn test_loader_helpers_with_install() {
    let (dir, config) = project(json!({
        "typeName": "GameAssets",
        "objectName": "loaded",
        "createLoadFunction": { "changePixiAssets": true }
    }));

    Pipeline::from_config(config).unwrap().finish(&MemoryReporter::new()).unwrap();

    let decl = fs::read_to_string(dir.path().join("src/assets.ts")).unwrap();
    assert!(decl.contains("export type GameAssetsHolder = { loaded: Partial<GameAssets> };"));
    assert!(decl.contains("export function installLoadBundle("));
    assert!(decl.contains("export type GameAssets = {"));
    // The loader is only replaced when installLoadBundle is called.
    assert!(!decl.lines().any(|l| l.starts_with("Assets.loadBundle")));
}

#[test]
fn test_minimal_manifest_declares_any() {
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("manifest.json");
    fs::write(
        &manifest_path,
        r#"{"bundles":[{"assets":[{"alias":["ui/button.png"],"data":{"tags":{}},"src":["button.png"]}]}]}"#,
    )
    .unwrap();

    let stage = asset_decl::DeclarationStage::new(asset_decl::DeclarationOptions {
        dist: dir.path().join("assets.ts"),
        ..Default::default()
    });
    stage
        .generate(&manifest_path, dir.path(), &MemoryReporter::new())
        .unwrap();

    let decl = fs::read_to_string(dir.path().join("assets.ts")).unwrap();
    assert!(decl.lines().any(|l| l == r#""ui_button_png":any"#));
}
