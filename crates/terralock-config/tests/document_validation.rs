//! Document validation tests for terralock-config.
// crates/terralock-config/tests/document_validation.rs
// =============================================================================
// Module: Document Validation Tests
// Description: Fail-fast field checks across every document section.
// Purpose: Ensure violations name the exact field and stop at the first one.
// =============================================================================

use terralock_config::CloudConfig;
use terralock_config::ConfigDocument;
use terralock_config::LlmConfig;
use terralock_config::S3BackendConfig;
use terralock_config::TerraformConfig;
use terralock_config::ValidationError;

/// Per-test result alias.
type TestResult = Result<(), String>;

/// Builds a document that passes every check.
fn valid_document() -> ConfigDocument {
    ConfigDocument {
        llm: LlmConfig::Ollama {
            url: "http://localhost:11434".to_string(),
            model: "llama3".to_string(),
        },
        cloud: CloudConfig::Aws {
            default_region: "eu-west-1".to_string(),
        },
        terraform: TerraformConfig {
            backend_type: "s3".to_string(),
            s3: S3BackendConfig {
                bucket_name: "valid-bucket-01".to_string(),
                bucket_region: "eu-west-1".to_string(),
                state_key: "infra/terraform.tfstate".to_string(),
            },
        },
    }
}

/// Asserts that validation fails naming exactly `field`.
fn assert_rejects_field(document: &ConfigDocument, field: &str) -> TestResult {
    match document.validate() {
        Err(ValidationError {
            field: reported,
            ..
        }) if reported == field => Ok(()),
        Err(error) => Err(format!("expected rejection of {field}, got {error}")),
        Ok(()) => Err(format!("expected rejection of {field}, document passed")),
    }
}

#[test]
fn complete_document_passes() -> TestResult {
    valid_document().validate().map_err(|err| err.to_string())
}

#[test]
fn ollama_url_is_required() -> TestResult {
    let mut document = valid_document();
    document.llm = LlmConfig::Ollama {
        url: String::new(),
        model: "llama3".to_string(),
    };
    assert_rejects_field(&document, "llm.ollama.url")
}

#[test]
fn ollama_url_must_be_http() -> TestResult {
    let mut document = valid_document();
    document.llm = LlmConfig::Ollama {
        url: "localhost:11434".to_string(),
        model: "llama3".to_string(),
    };
    assert_rejects_field(&document, "llm.ollama.url")
}

#[test]
fn ollama_model_is_required() -> TestResult {
    let mut document = valid_document();
    document.llm = LlmConfig::Ollama {
        url: "http://localhost:11434".to_string(),
        model: String::new(),
    };
    assert_rejects_field(&document, "llm.ollama.model")
}

#[test]
fn open_ai_requires_its_own_fields() -> TestResult {
    let mut document = valid_document();
    document.llm = LlmConfig::OpenAi {
        api_key: String::new(),
        model: "gpt-4o".to_string(),
    };
    assert_rejects_field(&document, "llm.open_ai.api_key")?;
    document.llm = LlmConfig::OpenAi {
        api_key: "sk-test".to_string(),
        model: String::new(),
    };
    assert_rejects_field(&document, "llm.open_ai.model")
}

#[test]
fn unselected_provider_fields_are_never_checked() -> TestResult {
    // Switching to OpenAI makes the Ollama fields cease to exist; only the
    // active variant's fields are validated.
    let mut document = valid_document();
    document.llm = LlmConfig::OpenAi {
        api_key: "sk-test".to_string(),
        model: "gpt-4o".to_string(),
    };
    document.validate().map_err(|err| err.to_string())
}

#[test]
fn aws_default_region_is_required_and_shaped() -> TestResult {
    let mut document = valid_document();
    document.cloud = CloudConfig::Aws {
        default_region: String::new(),
    };
    assert_rejects_field(&document, "cloud.aws.default_region")?;
    document.cloud = CloudConfig::Aws {
        default_region: "mars".to_string(),
    };
    assert_rejects_field(&document, "cloud.aws.default_region")
}

#[test]
fn gcp_selection_has_no_region_requirement() -> TestResult {
    let mut document = valid_document();
    document.cloud = CloudConfig::Gcp {};
    document.validate().map_err(|err| err.to_string())
}

#[test]
fn backend_type_must_be_s3() -> TestResult {
    let mut document = valid_document();
    document.terraform.backend_type = "local".to_string();
    assert_rejects_field(&document, "terraform.backend_type")?;
    document.terraform.backend_type = String::new();
    assert_rejects_field(&document, "terraform.backend_type")
}

#[test]
fn bucket_name_pattern_is_enforced() -> TestResult {
    let mut document = valid_document();
    document.terraform.s3.bucket_name = "My_Bucket".to_string();
    assert_rejects_field(&document, "terraform.s3.bucket_name")?;
    document.terraform.s3.bucket_name = "ab".to_string();
    assert_rejects_field(&document, "terraform.s3.bucket_name")?;
    document.terraform.s3.bucket_name = "a".repeat(64);
    assert_rejects_field(&document, "terraform.s3.bucket_name")?;
    document.terraform.s3.bucket_name = "valid-bucket-01".to_string();
    document.validate().map_err(|err| err.to_string())
}

#[test]
fn bucket_region_and_state_key_are_mandatory() -> TestResult {
    let mut document = valid_document();
    document.terraform.s3.bucket_region = "europe".to_string();
    assert_rejects_field(&document, "terraform.s3.bucket_region")?;
    let mut document = valid_document();
    document.terraform.s3.state_key = "  ".to_string();
    assert_rejects_field(&document, "terraform.s3.state_key")
}

#[test]
fn validation_stops_at_the_first_violation() -> TestResult {
    // Both the llm section and the backend section are broken; the llm
    // field is reported because sections validate in order.
    let mut document = valid_document();
    document.llm = LlmConfig::Ollama {
        url: String::new(),
        model: String::new(),
    };
    document.terraform.s3.bucket_name = "My_Bucket".to_string();
    assert_rejects_field(&document, "llm.ollama.url")
}

#[test]
fn yaml_layout_round_trips_through_the_tagged_shape() -> TestResult {
    let rendered = r"
llm:
  provider: ollama
  url: http://localhost:11434
  model: llama3
cloud:
  provider: aws
  default_region: eu-west-1
terraform:
  backend_type: s3
  s3:
    bucket_name: valid-bucket-01
    bucket_region: eu-west-1
    state_key: infra/terraform.tfstate
";
    let parsed: ConfigDocument =
        serde_yaml::from_str(rendered).map_err(|err| err.to_string())?;
    if parsed != valid_document() {
        return Err("parsed document does not match the built one".to_string());
    }
    Ok(())
}

#[test]
fn missing_leaf_fields_default_to_empty_for_the_validator() -> TestResult {
    // serde admits the document; the validator names the missing field.
    let rendered = r"
llm:
  provider: ollama
  url: http://localhost:11434
cloud:
  provider: aws
  default_region: eu-west-1
terraform:
  backend_type: s3
";
    let parsed: ConfigDocument =
        serde_yaml::from_str(rendered).map_err(|err| err.to_string())?;
    assert_rejects_field(&parsed, "llm.ollama.model")
}
