//! Named states and sensors.

/// A state label. Identity is its position in the organism.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    pub name: String,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A named external scalar input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sensor {
    pub name: String,
    pub value: f32,
}

impl Sensor {
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}
