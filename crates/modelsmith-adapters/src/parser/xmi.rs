//! XMI model parser.
//!
//! Reads the class/package structure out of a UML interchange file as
//! exported by modelling tools:
//!
//! ```xml
//! <xmi:XMI>
//!   <uml:Model xmi:type="uml:Model" name="EA_Model">
//!     <packagedElement xmi:type="uml:Package" name="Felles">
//!       <packagedElement xmi:type="uml:Class" xmi:id="EAID_1" name="Kontaktinformasjon">
//!         <ownedAttribute name="epostadresse">
//!           <type xmi:idref="EAJava_string"/>
//!         </ownedAttribute>
//!       </packagedElement>
//!     </packagedElement>
//!   </uml:Model>
//! </xmi:XMI>
//! ```
//!
//! Only well-formedness is checked. Element kinds the parser does not know
//! are walked through and ignored.

use std::collections::HashMap;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, instrument};

use modelsmith_core::{
    application::ports::ModelParser,
    domain::{DomainError, FieldRef, ModelClass, ModelInventory, is_path_segment, model_dir_name},
    error::SmithResult,
};

const XMI_TYPE: &[u8] = b"xmi:type";
const XMI_ID: &[u8] = b"xmi:id";
const XMI_IDREF: &[u8] = b"xmi:idref";

const UML_PACKAGE: &str = "uml:Package";
const UML_CLASS: &str = "uml:Class";

/// Id prefixes the modelling tool uses for built-in types.
const PRIMITIVE_PREFIXES: &[&str] = &["EAJava_", "EAnone_"];

/// Parser for XMI 2.x artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmiParser;

impl XmiParser {
    pub fn new() -> Self {
        Self
    }
}

impl ModelParser for XmiParser {
    #[instrument(skip_all, fields(bytes = payload.len()))]
    fn parse(&self, payload: &[u8]) -> SmithResult<ModelInventory> {
        let document = scan(payload)?;
        Ok(document.into_inventory())
    }
}

/// The attributes of one element the parser cares about.
#[derive(Debug, Default)]
struct ElementAttrs {
    xmi_type: Option<String>,
    xmi_id: Option<String>,
    xmi_idref: Option<String>,
    name: Option<String>,
    type_ref: Option<String>,
}

impl ElementAttrs {
    fn read(element: &BytesStart<'_>) -> Result<Self, DomainError> {
        let mut attrs = Self::default();
        for attr in element.attributes() {
            let attr = attr.map_err(malformed)?;
            let slot = match attr.key.as_ref() {
                XMI_TYPE => &mut attrs.xmi_type,
                XMI_ID => &mut attrs.xmi_id,
                XMI_IDREF => &mut attrs.xmi_idref,
                b"name" => &mut attrs.name,
                b"type" => &mut attrs.type_ref,
                _ => continue,
            };
            let value = attr.unescape_value().map_err(malformed)?;
            *slot = Some(value.into_owned());
        }
        Ok(attrs)
    }

    fn is(&self, kind: &str) -> bool {
        self.xmi_type.as_deref() == Some(kind)
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().map(str::trim).filter(|n| !n.is_empty())
    }
}

/// What an open element contributed, undone when it closes.
#[derive(Debug)]
enum Frame {
    /// A package; `true` when it pushed a path segment.
    Package(bool),
    /// A package whose name cannot be a directory; its classes are skipped.
    RejectedPackage,
    Class(usize),
    Attribute { class: usize, field: usize },
    Other,
}

#[derive(Debug)]
struct RawField {
    name: String,
    type_ref: Option<String>,
}

#[derive(Debug)]
struct RawClass {
    name: String,
    package: String,
    fields: Vec<RawField>,
}

/// Everything collected in one pass; type ids are resolved afterwards so
/// forward references work.
#[derive(Debug, Default)]
struct Document {
    classes: Vec<RawClass>,
    class_names: HashMap<String, String>,
    package_path: Vec<String>,
    rejected_packages: usize,
    stack: Vec<Frame>,
    saw_root: bool,
}

impl Document {
    fn open(&mut self, local_name: &[u8], attrs: ElementAttrs) -> Frame {
        if attrs.is(UML_PACKAGE) {
            return match attrs.name() {
                Some(name) if !name.split(['.', '/']).all(is_path_segment) => {
                    debug!(package = %name, "Skipping package with unusable name");
                    self.rejected_packages += 1;
                    Frame::RejectedPackage
                }
                Some(name) => {
                    self.package_path.push(name.to_lowercase());
                    Frame::Package(true)
                }
                None => Frame::Package(false),
            };
        }

        if attrs.is(UML_CLASS) {
            return self.open_class(attrs);
        }

        match (local_name, self.stack.last()) {
            (b"ownedAttribute", Some(Frame::Class(class))) => {
                let class = *class;
                let Some(name) = attrs.name().map(str::to_string) else {
                    return Frame::Other;
                };
                let fields = &mut self.classes[class].fields;
                fields.push(RawField {
                    name,
                    type_ref: attrs.type_ref.or(attrs.xmi_idref),
                });
                Frame::Attribute {
                    class,
                    field: fields.len() - 1,
                }
            }
            (b"type", Some(Frame::Attribute { class, field })) => {
                if let Some(idref) = attrs.xmi_idref {
                    self.classes[*class].fields[*field].type_ref = Some(idref);
                }
                Frame::Other
            }
            _ => Frame::Other,
        }
    }

    fn open_class(&mut self, attrs: ElementAttrs) -> Frame {
        let Some(name) = attrs.name().map(str::to_string) else {
            debug!(id = ?attrs.xmi_id, "Skipping unnamed class");
            return Frame::Other;
        };
        if !is_path_segment(&model_dir_name(&name)) {
            debug!(id = ?attrs.xmi_id, class = %name, "Skipping class with unusable name");
            return Frame::Other;
        }
        if let Some(id) = &attrs.xmi_id {
            self.class_names.insert(id.clone(), name.clone());
        }
        if self.rejected_packages > 0 {
            debug!(class = %name, "Skipping class inside a skipped package");
            return Frame::Other;
        }
        if self.package_path.is_empty() {
            debug!(class = %name, "Skipping class outside any package");
            return Frame::Other;
        }
        self.classes.push(RawClass {
            name,
            package: self.package_path.join("."),
            fields: Vec::new(),
        });
        Frame::Class(self.classes.len() - 1)
    }

    fn close(&mut self, frame: Frame) {
        match frame {
            Frame::Package(true) => {
                self.package_path.pop();
            }
            Frame::RejectedPackage => self.rejected_packages -= 1,
            _ => {}
        }
    }

    fn resolve_type(&self, type_ref: Option<&str>) -> String {
        let Some(type_ref) = type_ref else {
            return String::new();
        };
        if let Some(class) = self.class_names.get(type_ref) {
            return class.clone();
        }
        PRIMITIVE_PREFIXES
            .iter()
            .find_map(|prefix| type_ref.strip_prefix(prefix))
            .unwrap_or(type_ref)
            .to_string()
    }

    fn into_inventory(self) -> ModelInventory {
        let mut inventory = ModelInventory::new();
        for raw in &self.classes {
            let fields = raw
                .fields
                .iter()
                .map(|f| FieldRef::new(&f.name, self.resolve_type(f.type_ref.as_deref())))
                .collect();
            let class = ModelClass::new(&raw.name, &raw.package, fields);
            if !inventory.insert(class) {
                debug!(package = %raw.package, class = %raw.name, "Duplicate class ignored");
            }
        }
        debug!(classes = inventory.len(), "Parsed XMI");
        inventory
    }
}

fn scan(payload: &[u8]) -> Result<Document, DomainError> {
    let mut reader = Reader::from_reader(payload);
    reader.config_mut().trim_text(true);

    let mut doc = Document::default();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(element) => {
                doc.saw_root = true;
                let attrs = ElementAttrs::read(&element)?;
                let frame = doc.open(element.local_name().as_ref(), attrs);
                doc.stack.push(frame);
            }
            Event::Empty(element) => {
                doc.saw_root = true;
                let attrs = ElementAttrs::read(&element)?;
                let frame = doc.open(element.local_name().as_ref(), attrs);
                doc.close(frame);
            }
            Event::End(_) => {
                let frame = doc.stack.pop().ok_or_else(|| DomainError::MalformedArtifact {
                    reason: "closing tag without matching opening tag".into(),
                })?;
                doc.close(frame);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !doc.saw_root {
        return Err(DomainError::MalformedArtifact {
            reason: "no root element".into(),
        });
    }
    if !doc.stack.is_empty() {
        return Err(DomainError::MalformedArtifact {
            reason: format!("{} element(s) left unclosed", doc.stack.len()),
        });
    }

    Ok(doc)
}

fn malformed(e: impl std::fmt::Display) -> DomainError {
    DomainError::MalformedArtifact {
        reason: e.to_string(),
    }
}
