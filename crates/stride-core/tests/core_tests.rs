use std::collections::HashMap;
use stride_core::config::Settings;
use stride_core::convo::{persist, restore, ConversationLog};
use stride_core::*;
use tempfile::TempDir;

// ========================================================================
// Settings Tests (config/mod.rs)
// ========================================================================

#[test]
fn test_settings_default_values() {
    let settings = Settings::default();

    assert_eq!(settings.llm.model, "gemini-2.0-flash");
    assert_eq!(settings.llm.api_key_env, "GOOGLE_API_KEY");
    assert!(settings.llm.base_url.is_none());
    assert_eq!(settings.llm.max_output_tokens, 2048);

    assert_eq!(
        settings.paths.history_file,
        std::path::PathBuf::from("coach_history.json")
    );
    assert_eq!(
        settings.paths.template_file,
        std::path::PathBuf::from("prompts/run_feedback.txt")
    );
}

#[test]
fn test_settings_toml_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    let mut settings = Settings::default();
    settings.llm.model = "gemini-2.5-pro".to_string();
    settings.llm.max_output_tokens = 4096;
    settings.paths.history_file = "custom_history.json".into();

    let content = toml::to_string_pretty(&settings).unwrap();
    std::fs::write(&config_path, content).unwrap();

    let loaded_content = std::fs::read_to_string(&config_path).unwrap();
    let loaded: Settings = toml::from_str(&loaded_content).unwrap();

    assert_eq!(loaded.llm.model, "gemini-2.5-pro");
    assert_eq!(loaded.llm.max_output_tokens, 4096);
    assert_eq!(
        loaded.paths.history_file,
        std::path::PathBuf::from("custom_history.json")
    );
}

#[test]
fn test_settings_api_key_reads_from_env() {
    std::env::set_var("TEST_API_KEY_STRIDE", "test-key-12345");

    let mut settings = Settings::default();
    settings.llm.api_key_env = "TEST_API_KEY_STRIDE".to_string();

    assert_eq!(settings.api_key(), Some("test-key-12345".to_string()));

    std::env::remove_var("TEST_API_KEY_STRIDE");
}

#[test]
fn test_settings_build_chat_model_fails_without_key() {
    let mut settings = Settings::default();
    settings.llm.api_key_env = "NONEXISTENT_KEY_STRIDE_TEST".to_string();

    let err = settings.build_chat_model().unwrap_err();
    assert!(matches!(err, CoachError::Config(_)));
    assert!(err.to_string().contains("NONEXISTENT_KEY_STRIDE_TEST"));
}

// ========================================================================
// ConversationLog Tests (convo/log.rs)
// ========================================================================

#[test]
fn test_conversation_log_appends_in_order() {
    let mut log = ConversationLog::new();

    log.append(Turn::user(vec![Fragment::text("Hello")]));
    log.append(Turn::assistant(vec![Fragment::text("Hi there!")]));
    log.append(Turn::user(vec![Fragment::text("How was my run?")]));

    assert_eq!(log.len(), 3);
    assert_eq!(log.turns()[0].role, Role::User);
    assert_eq!(log.turns()[1].role, Role::Assistant);
    assert_eq!(
        log.turns()[2].fragments[0],
        Fragment::text("How was my run?")
    );
}

#[test]
fn test_conversation_log_tolerates_consecutive_user_turns() {
    // A failed submission leaves an unanswered user turn; the next
    // submission appends another without complaint.
    let mut log = ConversationLog::new();

    log.append(Turn::user(vec![Fragment::text("first attempt")]));
    log.append(Turn::user(vec![Fragment::text("second attempt")]));

    assert_eq!(log.len(), 2);
    assert_eq!(log.turns()[0].role, Role::User);
    assert_eq!(log.turns()[1].role, Role::User);
}

#[test]
fn test_conversation_log_last_turn() {
    let mut log = ConversationLog::new();
    assert!(log.last_turn().is_none());

    log.append(Turn::user(vec![Fragment::text("First")]));
    assert_eq!(
        log.last_turn().unwrap().fragments[0],
        Fragment::text("First")
    );
}

// ========================================================================
// Persistence Tests (convo/persistence.rs)
// ========================================================================

#[test]
fn test_persist_restore_roundtrip_preserves_text_and_order() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut log = ConversationLog::new();
    log.append(Turn::user(vec![Fragment::text("How was my tempo run?")]));
    log.append(Turn::assistant(vec![Fragment::text("Solid negative split.")]));
    log.append(Turn::user(vec![Fragment::text("Thanks!")]));

    persist(&log, &path).unwrap();
    let restored = restore(&path);

    assert_eq!(restored.len(), 3);
    assert_eq!(restored.turns()[0].role, Role::User);
    assert_eq!(
        restored.turns()[0].fragments[0],
        Fragment::text("How was my tempo run?")
    );
    assert_eq!(restored.turns()[1].role, Role::Assistant);
    assert_eq!(
        restored.turns()[1].fragments[0],
        Fragment::text("Solid negative split.")
    );
    assert_eq!(restored.turns()[2].fragments[0], Fragment::text("Thanks!"));
}

#[test]
fn test_persist_degrades_images_to_placeholder() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut log = ConversationLog::new();
    log.append(Turn::user(vec![
        Fragment::text("check my watch face"),
        Fragment::Image {
            media_type: "image/png".to_string(),
            data: "aGVsbG8=".to_string(),
        },
    ]));

    persist(&log, &path).unwrap();
    let restored = restore(&path);

    assert_eq!(restored.len(), 1);
    let fragments = &restored.turns()[0].fragments;
    assert_eq!(fragments[0], Fragment::text("check my watch face"));
    assert_eq!(fragments[1], Fragment::text(ATTACHMENT_PLACEHOLDER));
}

#[test]
fn test_persist_writes_role_and_parts_records() {
    // The durable format is a plain JSON array of {role, parts} records,
    // never raw file bytes.
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut log = ConversationLog::new();
    log.append(Turn::user(vec![Fragment::text("hello")]));
    persist(&log, &path).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(value[0]["role"], "user");
    assert_eq!(value[0]["parts"][0], "hello");
}

#[test]
fn test_restore_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let restored = restore(temp_dir.path().join("never_written.json"));
    assert!(restored.is_empty());
}

#[test]
fn test_restore_malformed_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");
    std::fs::write(&path, "{ this is not valid json ]").unwrap();

    let restored = restore(&path);
    assert!(restored.is_empty());
}

#[test]
fn test_persist_overwrites_previous_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("history.json");

    let mut log = ConversationLog::new();
    log.append(Turn::user(vec![Fragment::text("old")]));
    persist(&log, &path).unwrap();

    let mut log = ConversationLog::new();
    log.append(Turn::user(vec![Fragment::text("new")]));
    log.append(Turn::assistant(vec![Fragment::text("reply")]));
    persist(&log, &path).unwrap();

    let restored = restore(&path);
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.turns()[0].fragments[0], Fragment::text("new"));
}
