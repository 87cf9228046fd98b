#[cfg(test)]
mod tests {
    use crate::builders::parts::SelectorPart;
    use crate::builders::selector::Combinator;
    use crate::core::config::{
        ConfigManager, ConfigProvider, ExportFormat, SelectorDefinition, SelectorSheet,
    };
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn setup_sheet() -> (tempfile::TempDir, ConfigManager, PathBuf) {
        let dir = tempdir().unwrap();
        let sheet_path = dir.path().join("selectors.toml");
        let manager = ConfigManager::new_at(sheet_path.clone()).unwrap();
        (dir, manager, sheet_path)
    }

    fn parts(specs: &[&str]) -> Vec<SelectorPart> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn test_initialization() {
        let (_dir, manager, sheet_path) = setup_sheet();
        manager.initialize().unwrap();

        assert!(sheet_path.exists());
        let sheet = manager.load_config().unwrap();
        assert_eq!(sheet, SelectorSheet::sample());
        assert_eq!(
            manager.render_selector("main-link").unwrap(),
            "#main.container.editable > a[href$=\".png\"]:focus"
        );
    }

    #[test]
    fn test_initialize_keeps_existing_sheet() {
        let (_dir, mut manager, _sheet_path) = setup_sheet();
        manager
            .add_selector("only".to_string(), parts(&["element:p"]))
            .unwrap();
        manager.initialize().unwrap();

        let sheet = manager.load_config().unwrap();
        assert_eq!(sheet.selectors.len(), 1);
    }

    #[test]
    fn test_missing_sheet_loads_default() {
        let (_dir, manager, _sheet_path) = setup_sheet();
        assert_eq!(manager.load_config().unwrap(), SelectorSheet::default());
    }

    #[test]
    fn test_add_and_remove_selectors() {
        let (_dir, mut manager, _sheet_path) = setup_sheet();
        manager
            .add_selector("row".to_string(), parts(&["element:tr", "pseudo-class:nth-of-type(even)"]))
            .unwrap();
        manager
            .add_selector("cell".to_string(), parts(&["element:td"]))
            .unwrap();
        manager
            .add_combination(
                "row-cell".to_string(),
                "row".to_string(),
                Combinator::Descendant,
                "cell".to_string(),
            )
            .unwrap();

        assert_eq!(
            manager.render_selector("row-cell").unwrap(),
            "tr:nth-of-type(even)   td"
        );

        let dangling = manager.remove_selector("cell").unwrap();
        assert_eq!(dangling, vec!["row-cell".to_string()]);
        assert!(manager.render_selector("row-cell").is_err());
        assert!(manager.remove_selector("cell").is_err());

        assert!(manager.remove_selector("row-cell").unwrap().is_empty());
    }

    #[test]
    fn test_combination_that_cannot_render_is_not_saved() {
        let (_dir, mut manager, _sheet_path) = setup_sheet();
        manager
            .add_selector("a".to_string(), parts(&["element:a"]))
            .unwrap();
        manager
            .add_selector("b".to_string(), parts(&["element:b"]))
            .unwrap();
        let before = manager.load_config().unwrap();

        let err = manager
            .add_combination("a".to_string(), "a".to_string(), Combinator::Child, "b".to_string())
            .unwrap_err();
        assert!(format!("{err:#}").contains("a -> a"), "{err:#}");

        assert_eq!(manager.load_config().unwrap(), before);
        assert_eq!(manager.render_selector("a").unwrap(), "a");
    }

    #[test]
    fn test_import_that_cannot_render_is_not_saved() {
        let (dir, mut manager, _sheet_path) = setup_sheet();
        manager.initialize().unwrap();
        let before = manager.load_config().unwrap();

        let import_path = dir.path().join("loop.json");
        fs::write(
            &import_path,
            r#"{
                "fine": { "parts": ["element:p"] },
                "main": { "combine": { "left": "main", "combinator": ">", "right": "fine" } }
            }"#,
        )
        .unwrap();

        assert!(
            manager
                .import_selectors(import_path.to_str().unwrap(), "json")
                .is_err()
        );
        assert_eq!(manager.load_config().unwrap(), before);
        assert_eq!(
            manager.render_selector("main").unwrap(),
            "#main.container.editable"
        );
    }

    #[test]
    fn test_config_path_is_the_sheet_file() {
        let (_dir, manager, sheet_path) = setup_sheet();
        assert_eq!(manager.get_config_path().unwrap(), sheet_path);
    }

    #[test]
    fn test_add_rejects_invalid_selectors() {
        let (_dir, mut manager, sheet_path) = setup_sheet();
        assert!(
            manager
                .add_selector("bad".to_string(), parts(&["pseudo-element:after", "class:x"]))
                .is_err()
        );
        assert!(
            manager
                .add_combination(
                    "c".to_string(),
                    "nope".to_string(),
                    Combinator::Child,
                    "nope".to_string()
                )
                .is_err()
        );
        assert!(!sheet_path.exists());
    }

    #[test]
    fn test_sheet_parses_handwritten_toml() {
        let (_dir, manager, sheet_path) = setup_sheet();
        fs::write(
            &sheet_path,
            r#"
version = "1.0"

[settings]
verbose = true
pretty_json = false
export_format = "yaml"

[selectors.list]
parts = ["element:ul"]

[selectors.item]
parts = ["element:li", "class:active"]

[selectors.nav]
combine = { left = "list", combinator = " ", right = "item" }
parts = ["pseudo-class:hover"]
"#,
        )
        .unwrap();

        let sheet = manager.load_config().unwrap();
        assert!(sheet.settings.verbose);
        assert_eq!(sheet.settings.export_format, ExportFormat::Yaml);
        assert_eq!(
            manager.render_selector("nav").unwrap(),
            "ul   li.active:hover"
        );
        manager.validate_config().unwrap();
    }

    #[test]
    fn test_validate_fails_on_broken_sheet() {
        let (_dir, manager, _sheet_path) = setup_sheet();
        let mut sheet = SelectorSheet::default();
        sheet.selectors.insert(
            "loop".to_string(),
            SelectorDefinition::combination("loop".to_string(), Combinator::Child, "loop".to_string()),
        );
        manager.save_config(&sheet).unwrap();

        assert!(manager.validate_config().is_err());
    }

    #[test]
    fn test_export_json_skips_broken_selectors() {
        let (dir, manager, _sheet_path) = setup_sheet();
        manager.initialize().unwrap();
        let mut sheet = manager.load_config().unwrap();
        sheet.selectors.insert(
            "broken".to_string(),
            SelectorDefinition::combination("main".to_string(), Combinator::Child, "gone".to_string()),
        );
        manager.save_config(&sheet).unwrap();

        let export_path = dir.path().join("out.json");
        let skipped = manager
            .export_selectors(export_path.to_str().unwrap(), Some(ExportFormat::Json))
            .unwrap();
        assert_eq!(skipped.len(), 1);
        assert!(skipped[0].starts_with("broken:"));

        let exported: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&export_path).unwrap()).unwrap();
        assert_eq!(exported.len(), 3);
        assert_eq!(exported["main"], "#main.container.editable");
    }

    #[test]
    fn test_export_yaml_and_toml() {
        let (dir, manager, _sheet_path) = setup_sheet();
        manager.initialize().unwrap();

        let yaml_path = dir.path().join("out.yaml");
        manager
            .export_selectors(yaml_path.to_str().unwrap(), Some(ExportFormat::Yaml))
            .unwrap();
        let yaml: BTreeMap<String, String> =
            serde_yaml::from_str(&fs::read_to_string(&yaml_path).unwrap()).unwrap();
        assert_eq!(yaml["image-link"], "a[href$=\".png\"]:focus");

        let toml_path = dir.path().join("out.toml");
        manager
            .export_selectors(toml_path.to_str().unwrap(), Some(ExportFormat::Toml))
            .unwrap();
        let parsed: BTreeMap<String, String> =
            toml::from_str(&fs::read_to_string(&toml_path).unwrap()).unwrap();
        assert_eq!(parsed, yaml);
    }

    #[test]
    fn test_import_custom_file() {
        let (dir, mut manager, _sheet_path) = setup_sheet();
        let import_path = dir.path().join("extra.selectors");
        fs::write(
            &import_path,
            "# extra selectors\n[button]\nelement:button\nclass:primary\npseudo-class:disabled\n",
        )
        .unwrap();

        let count = manager
            .import_selectors(import_path.to_str().unwrap(), "custom")
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(
            manager.render_selector("button").unwrap(),
            "button.primary:disabled"
        );
    }
}
