//! XML to document model
//!
//! A `.pdm` file is a namespaced object tree:
//!
//! ```text
//! <Model>                      document element
//!   <o:RootObject>
//!     <c:Children>
//!       <o:Model Id="o2">      the model
//!         <a:Name>…</a:Name>   attributes
//!         <c:DBMS><o:Shortcut>…</o:Shortcut></c:DBMS>
//!         <c:Tables><o:Table Id="o4">…</o:Table></c:Tables>
//! ```
//!
//! Elements are matched on their local name, so the `o:`/`c:`/`a:` prefixes
//! do not matter. The mapping is structural: anything missing becomes an
//! empty string or an empty list, anything unknown is skipped. Only markup
//! that cannot be read at all is an error.

use pdm2_core::{Column, Dbms, Document, Key, KeyColumnRef, Model, PrimaryKeyRef, Shortcut, Table};
use roxmltree::Node;

/// Error while reading a model file
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("model file is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("malformed model XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Parse a model file from raw bytes
pub fn parse(bytes: &[u8]) -> Result<Document, ParseError> {
    let text = std::str::from_utf8(bytes)?;
    parse_str(text)
}

/// Parse a model file from text
pub fn parse_str(text: &str) -> Result<Document, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let xml = roxmltree::Document::parse(text)?;

    let model = child(xml.root_element(), "RootObject")
        .and_then(|root| child(root, "Children"))
        .and_then(|children| child(children, "Model"))
        .map(model_from)
        .unwrap_or_default();

    tracing::debug!(
        model = %model.name,
        tables = model.tables.len(),
        columns = model.column_count(),
        "parsed physical data model"
    );

    Ok(Document::new(model))
}

fn model_from(node: Node) -> Model {
    Model {
        object_id: text_of(node, "ObjectID"),
        name: text_of(node, "Name"),
        code: text_of(node, "Code"),
        author: text_of(node, "Author"),
        version: text_of(node, "Version"),
        comment: text_of(node, "Comment"),
        file_name: String::new(),
        dbms: Dbms {
            shortcut: child(node, "DBMS")
                .and_then(|dbms| child(dbms, "Shortcut"))
                .map(shortcut_from)
                .unwrap_or_default(),
        },
        tables: collection(node, "Tables", "Table").map(table_from).collect(),
    }
}

fn shortcut_from(node: Node) -> Shortcut {
    Shortcut {
        object_id: text_of(node, "ObjectID"),
        name: text_of(node, "Name"),
        code: text_of(node, "Code"),
    }
}

fn table_from(node: Node) -> Table {
    let primary_key = child(node, "PrimaryKey")
        .and_then(|pk| child(pk, "Key"))
        .map(|key| PrimaryKeyRef::new(attr(key, "Ref")));

    Table {
        id: attr(node, "Id"),
        object_id: text_of(node, "ObjectID"),
        name: text_of(node, "Name"),
        code: text_of(node, "Code"),
        comment: text_of(node, "Comment"),
        columns: collection(node, "Columns", "Column").map(column_from).collect(),
        keys: collection(node, "Keys", "Key").map(key_from).collect(),
        primary_key,
    }
}

fn column_from(node: Node) -> Column {
    Column {
        id: attr(node, "Id"),
        object_id: text_of(node, "ObjectID"),
        name: text_of(node, "Name"),
        code: text_of(node, "Code"),
        data_type: text_of(node, "DataType"),
        identity: text_of(node, "Identity"),
        mandatory: text_of(node, "Column.Mandatory"),
        default_value: text_of(node, "DefaultValue"),
        comment: text_of(node, "Comment"),
    }
}

fn key_from(node: Node) -> Key {
    Key {
        id: attr(node, "Id"),
        object_id: text_of(node, "ObjectID"),
        name: text_of(node, "Name"),
        code: text_of(node, "Code"),
        columns: collection(node, "Key.Columns", "Column")
            .map(|c| KeyColumnRef::new(attr(c, "Ref")))
            .collect(),
    }
}

/// First child element with the given local name
fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|n| n.is_element() && n.tag_name().name() == name)
}

/// Items of a collection element, e.g. every `Table` inside `Tables`
fn collection<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    name: &str,
    item: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    child(node, name)
        .into_iter()
        .flat_map(|c| c.children())
        .filter(move |n| n.is_element() && n.tag_name().name() == item)
}

/// Character data of the named attribute element, empty when absent
fn text_of(node: Node, name: &str) -> String {
    child(node, name)
        .map(|n| {
            n.children()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .collect()
        })
        .unwrap_or_default()
}

fn attr(node: Node, name: &str) -> String {
    node.attribute(name).unwrap_or_default().to_string()
}
