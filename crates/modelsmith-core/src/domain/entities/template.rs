//! Named templates and the data records they are rendered against.
//!
//! Template *bodies* belong to the renderer adapter; the core only knows
//! the names and the shape of the data each one consumes.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::{
    entities::model::{FieldRef, Model, ModelClass},
    error::DomainError,
};

/// The templates every renderer must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateName {
    Constants,
    Properties,
    LinkMapper,
    RestEndpoints,
    /// Stub source for one generated model class.
    Resource,
}

impl TemplateName {
    pub const ALL: [TemplateName; 5] = [
        Self::Constants,
        Self::Properties,
        Self::LinkMapper,
        Self::RestEndpoints,
        Self::Resource,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Constants => "constants",
            Self::Properties => "properties",
            Self::LinkMapper => "link-mapper",
            Self::RestEndpoints => "rest-endpoints",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::InvalidValue {
                field: "template",
                value: s.to_string(),
                reason: "unknown template name".into(),
            })
    }
}

/// Data for [`TemplateName::Constants`].
#[derive(Debug, Clone, Serialize)]
pub struct ConstantsData {
    pub consumer_name: String,
}

/// Data for [`TemplateName::Properties`].
#[derive(Debug, Clone, Serialize)]
pub struct PropertiesData {
    pub models: Vec<Model>,
}

/// Data for [`TemplateName::LinkMapper`].
#[derive(Debug, Clone, Serialize)]
pub struct LinkMapperData {
    pub component: String,
    pub package: String,
    pub models: Vec<Model>,
}

/// Data for [`TemplateName::RestEndpoints`].
#[derive(Debug, Clone, Serialize)]
pub struct RestEndpointsData {
    pub models: Vec<Model>,
}

/// Data for [`TemplateName::Resource`].
#[derive(Debug, Clone, Serialize)]
pub struct ResourceData {
    /// Java package the generated file declares.
    pub java_package: String,
    /// Dotted model package the class came from.
    pub model_package: String,
    pub name: String,
    pub fields: Vec<ResourceField>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceField {
    pub name: String,
    pub type_name: String,
    pub primitive: bool,
}

impl From<&FieldRef> for ResourceField {
    fn from(field: &FieldRef) -> Self {
        Self {
            name: field.name.clone(),
            type_name: field.type_name.clone(),
            primitive: field.is_primitive(),
        }
    }
}

impl ResourceData {
    pub fn for_class(class: &ModelClass, java_package: impl Into<String>) -> Self {
        Self {
            java_package: java_package.into(),
            model_package: class.package().to_string(),
            name: class.name().to_string(),
            fields: class.fields().iter().map(ResourceField::from).collect(),
        }
    }
}

/// Serialized template input handed to a renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    template: TemplateName,
    data: serde_json::Value,
}

impl RenderContext {
    pub fn new(template: TemplateName, data: serde_json::Value) -> Self {
        Self { template, data }
    }

    pub fn constants(data: &ConstantsData) -> Result<Self, DomainError> {
        Self::typed(TemplateName::Constants, data)
    }

    pub fn properties(data: &PropertiesData) -> Result<Self, DomainError> {
        Self::typed(TemplateName::Properties, data)
    }

    pub fn link_mapper(data: &LinkMapperData) -> Result<Self, DomainError> {
        Self::typed(TemplateName::LinkMapper, data)
    }

    pub fn rest_endpoints(data: &RestEndpointsData) -> Result<Self, DomainError> {
        Self::typed(TemplateName::RestEndpoints, data)
    }

    pub fn resource(data: &ResourceData) -> Result<Self, DomainError> {
        Self::typed(TemplateName::Resource, data)
    }

    fn typed<T: Serialize>(template: TemplateName, data: &T) -> Result<Self, DomainError> {
        let data = serde_json::to_value(data).map_err(|e| DomainError::TemplateData {
            template: template.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { template, data })
    }

    pub fn template(&self) -> TemplateName {
        self.template
    }

    pub fn data(&self) -> &serde_json::Value {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_names_round_trip() {
        for name in TemplateName::ALL {
            assert_eq!(name.as_str().parse::<TemplateName>().unwrap(), name);
        }
        assert!("nope".parse::<TemplateName>().is_err());
    }

    #[test]
    fn link_mapper_context_carries_all_fields() {
        let ctx = RenderContext::link_mapper(&LinkMapperData {
            component: "utdanning".into(),
            package: "elev".into(),
            models: vec![Model::new("Elev")],
        })
        .unwrap();

        assert_eq!(ctx.template(), TemplateName::LinkMapper);
        assert_eq!(ctx.data()["component"], "utdanning");
        assert_eq!(ctx.data()["models"][0]["name"], "Elev");
    }

    #[test]
    fn resource_data_flags_primitive_fields() {
        let class = ModelClass::new(
            "Fagkode",
            "felles.kodeverk",
            vec![FieldRef::new("kode", "String"), FieldRef::new("kjonn", "Kjonn")],
        );
        let data = ResourceData::for_class(&class, "no.fint.consumer.models.fagkode");
        assert!(data.fields[0].primitive);
        assert!(!data.fields[1].primitive);
        assert_eq!(data.model_package, "felles.kodeverk");
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: serde::Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("no representation"))
        }
    }

    #[test]
    fn serialization_failure_is_a_template_error() {
        let err = RenderContext::typed(TemplateName::Resource, &Unserializable).unwrap_err();
        assert!(matches!(err, DomainError::TemplateData { ref template, .. } if template == "resource"));
        assert_eq!(err.category(), crate::error::ErrorCategory::Template);
        assert!(err.to_string().contains("no representation"));
    }
}
