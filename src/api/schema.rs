//
//  obs-api
//  api/schema.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Declarative Entity Mapping
//!
//! Each entity describes its wire shape once, as a static [`Schema`] table of
//! [`Field`] bindings. A single generic walker ([`encode`] / [`decode`])
//! turns values into [`Element`] trees and back, so no entity carries a
//! hand-written serializer.
//!
//! ## Omission Rules
//!
//! | Binding | Written when empty? |
//! |---------|---------------------|
//! | [`Field::Text`] | yes, as an element with no text |
//! | [`Field::OptionalText`] | no |
//! | [`Field::Attribute`] | no |
//! | [`Field::Reference`] | no (see [`encode_reference`]) |
//! | [`Field::Repeated`] | nothing to write |
//! | [`Field::References`] | the wrapper path is always written |
//!
//! ## Example
//!
//! ```rust,ignore
//! const SCHEMA: Schema<Group> = Schema {
//!     root: "group",
//!     fields: &[
//!         Field::Text { element: "title", get: |g| g.id.as_str(), set: |g, v| g.id = v },
//!         Field::References {
//!             path: &["person"],
//!             element: "person",
//!             attribute: UserRef::ATTRIBUTE,
//!             get: |g| g.members.iter().map(Reference::id).collect(),
//!             push: |g, v| g.members.push(UserRef::from_id(v)),
//!         },
//!     ],
//! };
//! ```

use crate::api::common::{decode_reference, encode_reference};
use crate::api::xml::{Element, XmlError};

/// How one entity field maps onto the entity element.
pub enum Field<T: 'static> {
    /// Text content of a child element, always written.
    Text {
        element: &'static str,
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },

    /// Text content of a child element, omitted when empty.
    OptionalText {
        element: &'static str,
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },

    /// An attribute on the entity element, omitted when empty.
    Attribute {
        name: &'static str,
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },

    /// A single reference child, omitted when its identifier is empty.
    Reference {
        element: &'static str,
        attribute: &'static str,
        get: fn(&T) -> &str,
        set: fn(&mut T, String),
    },

    /// One child element per item, carrying the item as text. No wrapper.
    Repeated {
        element: &'static str,
        get: fn(&T) -> &[String],
        push: fn(&mut T, String),
    },

    /// Reference children nested under a path of wrapper elements.
    ///
    /// The wrappers are written even when there are no items. References
    /// with an empty identifier are skipped on output.
    References {
        path: &'static [&'static str],
        element: &'static str,
        attribute: &'static str,
        get: fn(&T) -> Vec<&str>,
        push: fn(&mut T, String),
    },
}

/// The complete wire shape of an entity.
pub struct Schema<T: 'static> {
    /// Name of the entity element.
    pub root: &'static str,
    /// Field bindings, in output order.
    pub fields: &'static [Field<T>],
}

/// Types that can be written as an XML element.
pub trait ToXml {
    fn to_element(&self) -> Element;

    /// Serializes the value as an XML document body.
    fn to_xml(&self) -> Result<Vec<u8>, XmlError> {
        self.to_element().to_bytes()
    }
}

/// Types that can be read from an XML element.
pub trait FromXml: Sized {
    /// Name of the element this type is read from.
    const ELEMENT: &'static str;

    fn from_element(element: &Element) -> Result<Self, XmlError>;

    /// Parses a document body and reads its root element.
    fn from_xml(input: &[u8]) -> Result<Self, XmlError> {
        Self::from_element(&Element::parse(input)?)
    }
}

/// Fails unless `element` is named `expected`.
pub fn expect_root(element: &Element, expected: &'static str) -> Result<(), XmlError> {
    if element.name == expected {
        Ok(())
    } else {
        Err(XmlError::UnexpectedElement {
            expected,
            found: element.name.clone(),
        })
    }
}

/// Builds the element for `value` according to `schema`.
pub fn encode<T: 'static>(schema: &Schema<T>, value: &T) -> Element {
    let mut root = Element::new(schema.root);

    for field in schema.fields {
        match field {
            Field::Text { element, get, .. } => {
                root.children.push(Element::new(*element).with_text(get(value)));
            }
            Field::OptionalText { element, get, .. } => {
                let text = get(value);
                if !text.is_empty() {
                    root.children.push(Element::new(*element).with_text(text));
                }
            }
            Field::Attribute { name, get, .. } => {
                let attr = get(value);
                if !attr.is_empty() {
                    root.attributes.push((name.to_string(), attr.to_string()));
                }
            }
            Field::Reference {
                element,
                attribute,
                get,
                ..
            } => {
                root.children.extend(encode_reference(element, attribute, get(value)));
            }
            Field::Repeated { element, get, .. } => {
                for item in get(value) {
                    root.children.push(Element::new(*element).with_text(item.as_str()));
                }
            }
            Field::References {
                path,
                element,
                attribute,
                get,
                ..
            } => {
                let mut nested: Vec<Element> = get(value)
                    .into_iter()
                    .filter_map(|id| encode_reference(element, attribute, id))
                    .collect();
                for wrapper in path.iter().rev() {
                    let mut container = Element::new(*wrapper);
                    container.children = nested;
                    nested = vec![container];
                }
                root.children.extend(nested);
            }
        }
    }

    root
}

/// Reads a value of `T` from `element` according to `schema`.
///
/// Missing children and attributes leave the corresponding field at its
/// default value; unknown children and attributes are ignored.
pub fn decode<T: Default + 'static>(schema: &Schema<T>, element: &Element) -> Result<T, XmlError> {
    expect_root(element, schema.root)?;

    let mut value = T::default();

    for field in schema.fields {
        match field {
            Field::Text {
                element: name, set, ..
            }
            | Field::OptionalText {
                element: name, set, ..
            } => {
                if let Some(child) = element.child(name) {
                    set(&mut value, child.text.clone());
                }
            }
            Field::Attribute { name, set, .. } => {
                if let Some(attr) = element.attribute(name) {
                    set(&mut value, attr.to_string());
                }
            }
            Field::Reference {
                element: name,
                attribute,
                set,
                ..
            } => {
                if let Some(child) = element.child(name) {
                    set(&mut value, decode_reference(child, attribute));
                }
            }
            Field::Repeated {
                element: name, push, ..
            } => {
                for child in element.children_named(name) {
                    push(&mut value, child.text.clone());
                }
            }
            Field::References {
                path,
                element: name,
                attribute,
                push,
                ..
            } => {
                let container = path
                    .iter()
                    .try_fold(element, |current, step| current.child(step));
                if let Some(container) = container {
                    for child in container.children_named(name) {
                        push(&mut value, decode_reference(child, attribute));
                    }
                }
            }
        }
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Sample {
        id: String,
        note: String,
        kind: String,
        owner: String,
        tags: Vec<String>,
        links: Vec<String>,
    }

    const SAMPLE_SCHEMA: Schema<Sample> = Schema {
        root: "sample",
        fields: &[
            Field::Attribute {
                name: "kind",
                get: |s| s.kind.as_str(),
                set: |s, v| s.kind = v,
            },
            Field::Text {
                element: "id",
                get: |s| s.id.as_str(),
                set: |s, v| s.id = v,
            },
            Field::OptionalText {
                element: "note",
                get: |s| s.note.as_str(),
                set: |s, v| s.note = v,
            },
            Field::Reference {
                element: "owner",
                attribute: "userid",
                get: |s| s.owner.as_str(),
                set: |s, v| s.owner = v,
            },
            Field::Repeated {
                element: "tag",
                get: |s| s.tags.as_slice(),
                push: |s, v| s.tags.push(v),
            },
            Field::References {
                path: &["outer", "inner"],
                element: "link",
                attribute: "name",
                get: |s| s.links.iter().map(String::as_str).collect(),
                push: |s, v| s.links.push(v),
            },
        ],
    };

    fn render(sample: &Sample) -> String {
        String::from_utf8(encode(&SAMPLE_SCHEMA, sample).to_bytes().unwrap()).unwrap()
    }

    #[test]
    fn test_empty_value_keeps_required_text_and_wrappers() {
        assert_eq!(
            render(&Sample::default()),
            "<sample><id></id><outer><inner></inner></outer></sample>"
        );
    }

    #[test]
    fn test_full_value_layout() {
        let sample = Sample {
            id: "x".into(),
            note: "n".into(),
            kind: "k".into(),
            owner: "alice".into(),
            tags: vec!["a".into(), "b".into()],
            links: vec!["l1".into(), "l2".into()],
        };
        assert_eq!(
            render(&sample),
            concat!(
                r#"<sample kind="k"><id>x</id><note>n</note><owner userid="alice"></owner>"#,
                "<tag>a</tag><tag>b</tag>",
                r#"<outer><inner><link name="l1"></link><link name="l2"></link></inner></outer>"#,
                "</sample>"
            )
        );
        let decoded = decode(&SAMPLE_SCHEMA, &encode(&SAMPLE_SCHEMA, &sample)).unwrap();
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_decode_ignores_unknown_content() {
        let element = Element::parse(br#"<sample extra="1"><id>y</id><other/></sample>"#).unwrap();
        let decoded = decode(&SAMPLE_SCHEMA, &element).unwrap();
        assert_eq!(decoded.id, "y");
        assert!(decoded.links.is_empty());
    }

    #[test]
    fn test_decode_rejects_wrong_root() {
        let element = Element::new("status");
        let err = decode(&SAMPLE_SCHEMA, &element).unwrap_err();
        assert_eq!(err.to_string(), "expected element type <sample> but have <status>");
    }
}
