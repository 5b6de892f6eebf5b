//! Heart disease schema (UCI columns)
//!
//! Categorical codes follow the encoding of the training data:
//! cp 0-3 (typical, atypical, non-anginal, asymptomatic),
//! restecg 0-2, slope 0-2, thal 0-3.

use crate::logic::domain::DomainId;
use super::types::{DomainSchema, FieldSpec, OutcomeMessages, SchemaError};

const YES_NO: &[(&str, i64)] = &[("No", 0), ("Yes", 1)];

pub fn schema() -> Result<DomainSchema, SchemaError> {
    let fields = vec![
        FieldSpec::integer("age", "Age").range(1.0, 120.0).unit("years"),
        FieldSpec::categorical("sex", "Sex", &[("Female", 0), ("Male", 1)])?,
        FieldSpec::categorical(
            "cp",
            "Chest Pain types",
            &[
                ("Typical angina", 0),
                ("Atypical angina", 1),
                ("Non-anginal pain", 2),
                ("Asymptomatic", 3),
            ],
        )?,
        FieldSpec::continuous("trestbps", "Resting Blood Pressure").range(50.0, 250.0).unit("mmHg"),
        FieldSpec::continuous("chol", "Serum Cholesterol").range(100.0, 600.0).unit("mg/dl"),
        FieldSpec::categorical("fbs", "Fasting Blood Sugar > 120 mg/dl", YES_NO)?,
        FieldSpec::categorical(
            "restecg",
            "Resting ECG",
            &[
                ("Normal", 0),
                ("ST-T wave abnormality", 1),
                ("Left ventricular hypertrophy", 2),
            ],
        )?,
        FieldSpec::continuous("thalach", "Maximum Heart Rate achieved").range(50.0, 250.0).unit("bpm"),
        FieldSpec::categorical("exang", "Exercise Induced Angina", YES_NO)?,
        FieldSpec::continuous("oldpeak", "ST depression induced by exercise")
            .range(0.0, 10.0)
            .step(0.1),
        FieldSpec::categorical(
            "slope",
            "Slope of ST segment",
            &[("Upsloping", 0), ("Flat", 1), ("Downsloping", 2)],
        )?,
        FieldSpec::integer("ca", "Number of major vessels").range(0.0, 3.0),
        FieldSpec::categorical(
            "thal",
            "Thal",
            &[
                ("Normal", 0),
                ("Fixed defect", 1),
                ("Reversible defect", 2),
                ("Not recorded", 3),
            ],
        )?,
    ];

    DomainSchema::new(
        DomainId::HeartDisease,
        "Heart Disease Prediction using ML",
        fields,
        OutcomeMessages::new(
            "The person is having heart disease",
            "The person does not have any heart disease",
        ),
    )
}
