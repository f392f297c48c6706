/// Object identifier: (object_number, generation_number).
/// Generation is always 0; documents are written in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u32, pub u16);

/// The subset of PDF object types (PDF 32000-1:2008 §7.3) that an
/// invoice document needs.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Name object, stored without the leading `/`.
    Name(String),
    /// Literal string, stored without the enclosing parens.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Key-value pairs in insertion order so output is deterministic.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn literal_string(s: &str) -> Self {
        PdfObject::LiteralString(s.to_string())
    }

    /// Build a dictionary from borrowed keys.
    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(dict_entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: owned_entries(dict_entries),
            data,
        }
    }

    /// A `[x0 y0 x1 y1]` rectangle, e.g. for `/MediaBox`.
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        PdfObject::Array(vec![
            PdfObject::Real(x0),
            PdfObject::Real(y0),
            PdfObject::Real(x1),
            PdfObject::Real(y1),
        ])
    }
}

impl From<ObjId> for PdfObject {
    fn from(id: ObjId) -> Self {
        PdfObject::Reference(id)
    }
}

fn owned_entries(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obj_ids_order_by_number() {
        assert!(ObjId(2, 0) < ObjId(10, 0));
        assert_eq!(ObjId(3, 0), ObjId(3, 0));
    }

    #[test]
    fn dict_keeps_insertion_order() {
        let obj = PdfObject::dict(vec![
            ("Type", PdfObject::name("Page")),
            ("Parent", ObjId(2, 0).into()),
        ]);
        match obj {
            PdfObject::Dictionary(entries) => {
                assert_eq!(entries[0].0, "Type");
                assert_eq!(entries[1].0, "Parent");
            }
            _ => panic!("expected Dictionary"),
        }
    }

    #[test]
    fn rect_has_four_reals() {
        match PdfObject::rect(0.0, 0.0, 595.28, 841.89) {
            PdfObject::Array(items) => assert_eq!(items.len(), 4),
            _ => panic!("expected Array"),
        }
    }

    #[test]
    fn stream_keeps_data() {
        let obj = PdfObject::stream(
            vec![("Filter", PdfObject::name("FlateDecode"))],
            b"abc".to_vec(),
        );
        match obj {
            PdfObject::Stream { dict, data } => {
                assert_eq!(dict.len(), 1);
                assert_eq!(data, b"abc");
            }
            _ => panic!("expected Stream"),
        }
    }
}
