//! Diabetes schema (Pima Indians columns)

use crate::logic::domain::DomainId;
use super::types::{DomainSchema, FieldSpec, OutcomeMessages, SchemaError};

pub fn schema() -> Result<DomainSchema, SchemaError> {
    let fields = vec![
        FieldSpec::integer("Pregnancies", "Number of Pregnancies").range(0.0, 20.0).unit("count"),
        FieldSpec::continuous("Glucose", "Glucose Level").range(0.0, 300.0).unit("mg/dL"),
        FieldSpec::continuous("BloodPressure", "Blood Pressure value").range(0.0, 200.0).unit("mmHg"),
        FieldSpec::continuous("SkinThickness", "Skin Thickness value").range(0.0, 100.0).unit("mm"),
        FieldSpec::continuous("Insulin", "Insulin Level").range(0.0, 900.0).unit("µU/mL"),
        FieldSpec::continuous("BMI", "BMI value").range(0.0, 70.0).step(0.1),
        FieldSpec::continuous("DiabetesPedigreeFunction", "Diabetes Pedigree Function value")
            .range(0.0, 2.5)
            .step(0.001),
        FieldSpec::integer("Age", "Age of the Person").range(0.0, 120.0).unit("years"),
    ];

    DomainSchema::new(
        DomainId::Diabetes,
        "Diabetes Prediction using ML",
        fields,
        OutcomeMessages::new("The person is diabetic", "The person is not diabetic"),
    )
}
