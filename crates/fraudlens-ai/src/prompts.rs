//! Persona instructions, prompt text, and the response schema.

use fraudlens_core::{Field, Persona, TransactionRequest};
use serde_json::{Value, json};

use crate::generate::GenerateRequest;

/// Low temperature keeps both personas close to deterministic.
pub const TEMPERATURE: f32 = 0.1;

const SIMULATED_MODEL_INSTRUCTION: &str = "\
You are an AI assistant simulating a highly accurate XGBoost model trained for credit card fraud detection.
Your purpose is to classify transactions based on a set of anonymized features.

BACKGROUND:
The model was trained on a dataset with a severe class imbalance, where only 0.17% of transactions were fraudulent.
The features (V1, V2, etc.) are the result of a PCA transformation on the original transaction data and are all numerical.
The model was optimized to have high sensitivity (recall) for the fraudulent class, meaning it's crucial to identify fraud even if it leads to some false positives.
The most important features for prediction have been identified as V10, V12, V14, and V17. Strongly negative values in these features are highly indicative of fraud.

TASK:
Given the following transaction data, classify it as 'Fraudulent' or 'Not Fraudulent'.
Provide your analysis in the specified JSON format.
- 'prediction': Your classification.
- 'confidence': A score from 0.0 to 1.0 indicating your certainty. A fraudulent transaction should have high confidence.
- 'reasoning': A brief, non-technical explanation for your decision, referencing the feature values provided.";

const AI_ASSISTANT_INSTRUCTION: &str = "\
You are a helpful AI Financial Assistant. Your task is to analyze a credit card transaction for potential signs of fraud.
Provide your analysis in a specified JSON format.

Consider the provided anonymized features (V10, V12, etc.) and the transaction amount.
While you don't know what the features represent, look for anomalous or extreme values that might suggest unusual activity.

Provide a clear 'Fraudulent' or 'Not Fraudulent' prediction, a confidence score, and a concise, easy-to-understand reasoning for your assessment.";

pub fn system_instruction(persona: Persona) -> &'static str {
    match persona {
        Persona::SimulatedModel => SIMULATED_MODEL_INSTRUCTION,
        Persona::AiAssistant => AI_ASSISTANT_INSTRUCTION,
    }
}

/// User prompt listing the five values exactly as entered.
pub fn build_user_prompt(request: &TransactionRequest) -> String {
    let mut prompt = String::from("Analyze the following transaction data:\n");
    for field in Field::ALL {
        prompt.push_str(&format!(
            "- {}: {}\n",
            field.prompt_label(),
            request.get(field)
        ));
    }
    prompt
}

/// Schema for `{prediction, confidence, reasoning}`, in Gemini's OpenAPI subset.
pub fn verdict_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "prediction": {
                "type": "STRING",
                "format": "enum",
                "enum": ["Fraudulent", "Not Fraudulent"],
                "description": "The classification of the transaction, either 'Fraudulent' or 'Not Fraudulent'."
            },
            "confidence": {
                "type": "NUMBER",
                "description": "A confidence score between 0.0 and 1.0."
            },
            "reasoning": {
                "type": "STRING",
                "description": "A brief explanation for the prediction."
            }
        },
        "required": ["prediction", "confidence", "reasoning"],
        "propertyOrdering": ["prediction", "confidence", "reasoning"]
    })
}

/// Full generation request for one persona.
pub fn persona_request(persona: Persona, request: &TransactionRequest) -> GenerateRequest {
    GenerateRequest {
        system_instruction: system_instruction(persona).to_string(),
        user_prompt: build_user_prompt(request),
        response_schema: verdict_schema(),
        temperature: TEMPERATURE,
    }
}
