//! Tests for document shape detection and flat (API) graph resolution.
mod common;
use common::*;
use promptgraph::extract_prompts;
use promptgraph::prelude::*;
use serde_json::json;

#[test]
fn test_shape_detection() {
    let (nodes, links) = create_ksampler_flow();
    let editor_doc = WorkflowDocument::from_value(json!({ "nodes": nodes, "links": links }))
        .expect("editor document");
    assert_eq!(editor_doc.shape(), DocumentShape::Editor);

    let api_doc = WorkflowDocument::from_value(create_api_flow()).expect("api document");
    assert_eq!(api_doc.shape(), DocumentShape::Api);

    let empty = WorkflowDocument::from_value(json!({})).expect("empty object is a flat graph");
    assert_eq!(empty.shape(), DocumentShape::Api);
}

#[test]
fn test_missing_or_null_links_are_empty() {
    for doc in [json!({ "nodes": [] }), json!({ "nodes": [], "links": null })] {
        match WorkflowDocument::from_value(doc).expect("valid document") {
            WorkflowDocument::Editor(workflow) => assert!(workflow.links.is_empty()),
            other => panic!("expected editor shape, got {:?}", other.shape()),
        }
    }
}

#[test]
fn test_structural_errors() {
    let cases = [
        json!([1, 2, 3]),
        json!("workflow"),
        json!(null),
        json!({ "nodes": {} }),
        json!({ "nodes": [], "links": "1,2" }),
    ];
    for value in cases {
        let result = WorkflowDocument::from_value(value.clone());
        assert!(
            matches!(result, Err(WorkflowError::MalformedGraph(_))),
            "expected malformed graph for {}",
            value
        );
    }
}

#[test]
fn test_decode_error_from_text() {
    let result = "{ not json".parse::<WorkflowDocument>();
    assert!(matches!(result, Err(WorkflowError::Decode(_))));
}

#[test]
fn test_malformed_node_entry_fails_resolution() {
    let document = WorkflowDocument::from_value(json!({ "nodes": [42], "links": [] }))
        .expect("shape is valid");
    let result = PromptResolver::default().resolve_observed(&document, &mut NoopObserver);
    assert!(matches!(result, Err(WorkflowError::MalformedGraph(_))));
}

#[test]
fn test_api_dual_prompt_fields() {
    let document = WorkflowDocument::from_value(create_api_flow()).expect("api document");
    let prompts = resolve(&document);

    assert_eq!(prompts.positive.as_deref(), Some("a woman levitates above a lake"));
    assert_eq!(prompts.negative.as_deref(), Some("bad hands"));
    assert_eq!(prompts.strategy, Some(Strategy::ApiGraph));
}

#[test]
fn test_api_link_references_count_as_absent() {
    let document = WorkflowDocument::from_value(json!({
        "5": {
            "class_type": "WanVideoTextEncode",
            "inputs": { "positive_prompt": ["12", 0], "negative_prompt": "washed out" }
        }
    }))
    .expect("api document");
    let prompts = resolve(&document);

    assert_eq!(prompts.positive, None);
    assert_eq!(prompts.negative.as_deref(), Some("washed out"));
}

#[test]
fn test_api_qwen_prompt_fallback() {
    let document = WorkflowDocument::from_value(json!({
        "3": { "class_type": "KSampler", "inputs": { "seed": 1 } },
        "7": { "class_type": "TextEncodeQwenImageEdit", "inputs": { "prompt": " make it night " } },
        "8": { "class_type": "TextEncodeQwenImageEdit", "inputs": { "prompt": "second" } }
    }))
    .expect("api document");
    let prompts = resolve(&document);

    assert_eq!(prompts.positive.as_deref(), Some("make it night"));
    assert_eq!(prompts.negative, None);
}

#[test]
fn test_api_empty_dual_encoder_falls_back_to_qwen() {
    let document = WorkflowDocument::from_value(json!({
        "1": { "class_type": "WanVideoTextEncode", "inputs": { "positive_prompt": "  " } },
        "2": { "class_type": "TextEncodeQwenImageEdit", "inputs": { "prompt": "edit text" } }
    }))
    .expect("api document");

    assert_eq!(resolve(&document).positive.as_deref(), Some("edit text"));
}

#[test]
fn test_api_entries_that_are_not_objects_are_dropped() {
    let document = WorkflowDocument::from_value(json!({
        "version": 0.4,
        "extra": ["x"],
        "9": { "class_type": "WanVideoTextEncode", "inputs": { "positive_prompt": "kept" } }
    }))
    .expect("api document");
    match &document {
        WorkflowDocument::Api(workflow) => assert_eq!(workflow.entries.len(), 1),
        other => panic!("expected API shape, got {:?}", other.shape()),
    }
    assert_eq!(resolve(&document).positive.as_deref(), Some("kept"));
}

#[test]
fn test_api_without_known_nodes_resolves_to_nothing() {
    let document = WorkflowDocument::from_value(json!({
        "1": { "class_type": "CheckpointLoaderSimple", "inputs": {} },
        "2": { "inputs": "not a map" }
    }))
    .expect("api document");
    let mut observer = RecordingObserver::new();
    let prompts = PromptResolver::default()
        .resolve_observed(&document, &mut observer)
        .expect("should resolve");

    assert!(prompts.is_empty());
    assert_eq!(
        observer.events,
        vec![
            ResolutionEvent::ShapeDetected {
                shape: DocumentShape::Api
            },
            ResolutionEvent::StrategyFinished {
                strategy: Strategy::ApiGraph,
                matched: false
            },
        ]
    );
}

#[test]
fn test_extract_prompts_convenience() {
    let prompts = extract_prompts(create_api_flow()).expect("should resolve");
    assert_eq!(prompts.negative.as_deref(), Some("bad hands"));

    assert!(extract_prompts(json!(7)).is_err());
}
