use pdf_quizgen::config::Config;

#[test]
fn parse_example_config() {
    let raw = include_str!("../pdf-quizgen.example.toml");
    let cfg: Config = toml::from_str(raw).expect("parse TOML");
    assert_eq!(cfg.model.task, "text2text-generation");
    assert_eq!(cfg.model.name, "valhalla/t5-base-qg-hl");
    assert_eq!(cfg.python.env.get("TOKENIZERS_PARALLELISM").map(String::as_str), Some("false"));
}

#[test]
fn missing_sections_fall_back_to_defaults() {
    let cfg: Config = toml::from_str("[model]\ntask = \"text2text-generation\"\nname = \"t5-small\"\n")
        .expect("parse TOML");
    assert_eq!(cfg.model.name, "t5-small");
    assert_eq!(cfg.python.python_exe, "python3");
    assert_eq!(cfg.python.scripts_dir, "scripts");
    assert_eq!(cfg.logging.level, "warn");
    assert!(!cfg.logging.write_to_file);
    assert!(cfg.debug.keep_python_stderr);
}

#[test]
fn load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("quizgen.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\njson = true\nwrite_to_file = false\nfile_path = \"\"\n")
        .unwrap();

    let cfg = Config::resolve(Some(&path)).unwrap();
    assert_eq!(cfg.logging.level, "debug");
    assert!(cfg.logging.json);
    assert_eq!(cfg.model.name, "valhalla/t5-base-qg-hl");
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(format!("{err:#}").contains("reading config"));
}
