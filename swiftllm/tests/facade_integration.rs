use std::time::Duration;

use swiftllm::{
    CapabilityConfig, ChatError, ChatErrorKind, LanguageModelBuilder, ProviderConfig, ProviderId,
    ProviderKind, ResponseType, sw_schema,
};

fn expect_setup_error(result: Result<LanguageModelBuilder, ChatError>) -> ChatError {
    match result {
        Ok(_) => panic!("provider setup should fail"),
        Err(error) => error,
    }
}

#[test]
fn groq_model_builds_offline_and_resolves_fuzzy_name() {
    let config = CapabilityConfig::builder(
        "Find all the names, ages, and titles in the text provided.",
    )
    .schema(sw_schema! { name: "str", age: "int", title: "str" })
    .build()
    .expect("config should build");

    let provider = ProviderConfig::new(ProviderKind::Groq)
        .with_api_key("gsk_test_key")
        .with_timeout(Duration::from_secs(5));
    let model = swiftllm::language_model(&provider)
        .expect("provider should build")
        .config(config)
        .model("mixtral")
        .build()
        .expect("model should build");

    assert_eq!(model.provider(), ProviderId::Groq);
    assert_eq!(model.model(), "mixtral-8x7b-32768");
    assert_eq!(model.config().response_type(), ResponseType::Json);
    assert_eq!(model.history().len(), 2);
}

#[test]
fn openai_model_defaults_to_first_catalog_entry() {
    let provider = ProviderConfig::new(ProviderKind::OpenAi)
        .with_api_key("sk-test")
        .with_base_url("http://127.0.0.1:9/v1");
    let model = swiftllm::with_tracing(
        swiftllm::language_model(&provider).expect("provider should build"),
    )
    .build()
    .expect("model should build");

    assert_eq!(model.provider(), ProviderId::OpenAi);
    assert_eq!(model.model(), "gpt-3.5-turbo");
}

#[test]
fn missing_key_is_a_missing_credential_error() {
    let error = expect_setup_error(swiftllm::language_model(&ProviderConfig::from_lookup(
        ProviderKind::Groq,
        |_| None,
    )));

    assert_eq!(error.kind, ChatErrorKind::MissingCredential);
    assert!(error.message.contains("GROQ_API_KEY"));
}

#[test]
fn misshapen_key_is_an_invalid_config_error() {
    let provider = ProviderConfig::new(ProviderKind::Groq).with_api_key("sk-openai-key");
    let error = expect_setup_error(swiftllm::language_model(&provider));

    assert_eq!(error.kind, ChatErrorKind::InvalidConfig);
    assert!(error.provider_error().is_some());
}

#[test]
fn unsupported_model_lists_the_catalog() {
    let provider = ProviderConfig::new(ProviderKind::OpenAi).with_api_key("sk-test");
    let error = match swiftllm::language_model(&provider)
        .expect("provider should build")
        .model("claude-3")
        .build()
    {
        Ok(_) => panic!("unknown model should fail"),
        Err(error) => error,
    };

    assert_eq!(error.kind, ChatErrorKind::UnsupportedModel);
    assert!(error.message.contains("gpt-4o-mini"));
}
