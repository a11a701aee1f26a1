use llm_porter::convert::{LlmConverter, API_KEY_ENV};
use serial_test::serial;

#[test]
#[serial]
fn converter_construction_requires_api_key_env() {
    std::env::remove_var(API_KEY_ENV);

    let err = LlmConverter::new_from_env("https://llm.example.com/v1/convert").unwrap_err();
    assert!(
        err.to_string().contains(API_KEY_ENV),
        "error must name the missing variable, got: {err}"
    );
}

#[test]
#[serial]
fn converter_construction_succeeds_with_api_key_env() {
    std::env::set_var(API_KEY_ENV, "test-key");

    let converter = LlmConverter::new_from_env("https://llm.example.com/v1/convert");
    assert!(converter.is_ok());

    std::env::remove_var(API_KEY_ENV);
}
