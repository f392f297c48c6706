use std::collections::BTreeMap;
use std::io::{self, Write};

use crate::objects::{ObjId, PdfObject};

/// Serializes PDF objects to any `Write` target and records the byte
/// offset of every indirect object for the cross-reference table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref: BTreeMap<u32, usize>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref: BTreeMap::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    /// `%PDF-1.7` plus a comment of four high bytes so transfer tools
    /// treat the file as binary.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    /// Write `id` as an indirect object.
    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref.insert(id.0, self.offset);
        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        serialize(obj, &mut buf);
        buf.extend_from_slice(b"\nendobj\n");
        self.write_bytes(&buf)
    }

    /// Write the xref table, trailer, `startxref` and `%%EOF`.
    /// Object numbers missing from the table become free entries.
    pub fn write_xref_and_trailer(
        &mut self,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_offset = self.offset;
        let size = self.xref.keys().next_back().map_or(1, |max| max + 1);

        let mut buf = format!("xref\n0 {}\n", size).into_bytes();
        buf.extend_from_slice(b"0000000000 65535 f\r\n");
        for num in 1..size {
            match self.xref.get(&num) {
                Some(off) => buf.extend_from_slice(format!("{:010} 00000 n\r\n", off).as_bytes()),
                None => buf.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }

        buf.extend_from_slice(
            format!("trailer\n<< /Size {} /Root {} {} R", size, root_id.0, root_id.1).as_bytes(),
        );
        if let Some(info) = info_id {
            buf.extend_from_slice(format!(" /Info {} {} R", info.0, info.1).as_bytes());
        }
        buf.extend_from_slice(format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes());
        self.write_bytes(&buf)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn serialize(obj: &PdfObject, out: &mut Vec<u8>) {
    match obj {
        PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
        PdfObject::Real(f) => out.extend_from_slice(format_number(*f).as_bytes()),
        PdfObject::Name(name) => {
            out.push(b'/');
            out.extend_from_slice(name.as_bytes());
        }
        PdfObject::LiteralString(s) => {
            out.push(b'(');
            out.extend_from_slice(&encode_pdf_string(s));
            out.push(b')');
        }
        PdfObject::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b' ');
                }
                serialize(item, out);
            }
            out.push(b']');
        }
        PdfObject::Dictionary(entries) => serialize_dict(entries, None, out),
        PdfObject::Stream { dict, data } => {
            serialize_dict(dict, Some(data.len()), out);
            out.extend_from_slice(b"\nstream\n");
            out.extend_from_slice(data);
            out.extend_from_slice(b"\nendstream");
        }
        PdfObject::Reference(id) => {
            out.extend_from_slice(format!("{} {} R", id.0, id.1).as_bytes());
        }
    }
}

fn serialize_dict(entries: &[(String, PdfObject)], length: Option<usize>, out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");
    for (key, val) in entries {
        out.extend_from_slice(b" /");
        out.extend_from_slice(key.as_bytes());
        out.push(b' ');
        serialize(val, out);
    }
    if let Some(len) = length {
        out.extend_from_slice(format!(" /Length {}", len).as_bytes());
    }
    out.extend_from_slice(b" >>");
}

/// Encode text for a PDF literal string under WinAnsiEncoding.
///
/// Delimiters are backslash-escaped, Latin-1 characters above ASCII are
/// written as octal escapes, anything else becomes `?`.
pub fn encode_pdf_string(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.extend_from_slice(b"\\\\"),
            '(' => out.extend_from_slice(b"\\("),
            ')' => out.extend_from_slice(b"\\)"),
            ' '..='~' => out.push(c as u8),
            '\u{a0}'..='\u{ff}' => out.extend_from_slice(format!("\\{:03o}", c as u32).as_bytes()),
            _ => out.push(b'?'),
        }
    }
    out
}

/// Format a number for PDF output: no exponent, no trailing zeros.
pub fn format_number(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
