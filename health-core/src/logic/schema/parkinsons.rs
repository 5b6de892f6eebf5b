//! Parkinson's schema (voice measurements)

use crate::logic::domain::DomainId;
use super::types::{DomainSchema, FieldSpec, OutcomeMessages, SchemaError};

/// (name, label) in feature order
const MEASUREMENTS: &[(&str, &str)] = &[
    ("fo", "MDVP:Fo(Hz)"),
    ("fhi", "MDVP:Fhi(Hz)"),
    ("flo", "MDVP:Flo(Hz)"),
    ("Jitter_percent", "MDVP:Jitter(%)"),
    ("Jitter_Abs", "MDVP:Jitter(Abs)"),
    ("RAP", "MDVP:RAP"),
    ("PPQ", "MDVP:PPQ"),
    ("DDP", "Jitter:DDP"),
    ("Shimmer", "MDVP:Shimmer"),
    ("Shimmer_dB", "MDVP:Shimmer(dB)"),
    ("APQ3", "Shimmer:APQ3"),
    ("APQ5", "Shimmer:APQ5"),
    ("APQ", "MDVP:APQ"),
    ("DDA", "Shimmer:DDA"),
    ("NHR", "NHR"),
    ("HNR", "HNR"),
    ("RPDE", "RPDE"),
    ("DFA", "DFA"),
    ("spread1", "spread1"),
    ("spread2", "spread2"),
    ("D2", "D2"),
    ("PPE", "PPE"),
];

pub fn schema() -> Result<DomainSchema, SchemaError> {
    let fields = MEASUREMENTS
        .iter()
        .map(|&(name, label)| {
            // No step: values carry up to six decimals
            let field = FieldSpec::continuous(name, label);
            match name {
                "fo" | "fhi" | "flo" => field.min(0.0).unit("Hz"),
                // spread1 is a log-scale measure and is negative in practice
                "spread1" => field,
                _ => field.min(0.0),
            }
        })
        .collect();

    DomainSchema::new(
        DomainId::Parkinsons,
        "Parkinson's Disease Prediction using ML",
        fields,
        OutcomeMessages::new(
            "The person has Parkinson's disease",
            "The person does not have Parkinson's disease",
        ),
    )
}
