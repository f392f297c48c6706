use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{DrawError, Result};
use crate::fonts::{BuiltinFont, TextStyle};
use crate::graphics::{Color, TextAlign};
use crate::images::{load_image, ImageData, ImageEncoding, ImageId};
use crate::objects::{ObjId, PdfObject};
use crate::writer::{encode_pdf_string, format_number, PdfWriter};

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const FIRST_FONT_OBJ_NUM: u32 = 3;

/// High-level drawing surface that produces a PDF document.
///
/// Coordinates are PDF points with the origin at the bottom-left corner
/// of the page. Page content stays in memory until `end_document`, so a
/// finished page can be reopened with `open_page` to add overlays such as
/// "Page X of Y" once the total page count is known.
pub struct PdfDocument<W: Write> {
    writer: W,
    info: Vec<(String, String)>,
    pages: Vec<Page>,
    /// Index into `pages` of the page receiving drawing operations.
    current: Option<usize>,
    /// Number of pages closed at least once.
    completed: usize,
    images: Vec<ImageData>,
    compress: bool,
}

struct Page {
    width: f64,
    height: f64,
    content: Vec<u8>,
    images: BTreeSet<usize>,
}

impl PdfDocument<BufWriter<File>> {
    /// Create a document that is written to `path` by `end_document`.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> PdfDocument<W> {
    pub fn new(writer: W) -> Self {
        PdfDocument {
            writer,
            info: Vec::new(),
            pages: Vec::new(),
            current: None,
            completed: 0,
            images: Vec::new(),
            compress: false,
        }
    }

    /// Set a document info entry (e.g. "Title", "Creator").
    pub fn set_info(&mut self, key: &str, value: &str) -> &mut Self {
        self.info.push((key.to_string(), value.to_string()));
        self
    }

    /// Flate-compress page content streams. Off by default so tests can
    /// inspect the operators.
    pub fn set_compression(&mut self, enabled: bool) -> &mut Self {
        self.compress = enabled;
        self
    }

    /// Begin a new page, closing the open one if any.
    pub fn begin_page(&mut self, width: f64, height: f64) -> &mut Self {
        self.close_current();
        self.pages.push(Page {
            width,
            height,
            content: Vec::new(),
            images: BTreeSet::new(),
        });
        self.current = Some(self.pages.len() - 1);
        self
    }

    /// Close the open page.
    pub fn end_page(&mut self) -> Result<()> {
        self.close_current();
        Ok(())
    }

    fn close_current(&mut self) {
        if let Some(index) = self.current.take() {
            if index >= self.completed {
                self.completed = index + 1;
            }
        }
    }

    /// Number of pages that have been closed at least once.
    pub fn page_count(&self) -> usize {
        self.completed
    }

    /// Reopen a finished page (1-based) so more content can be drawn on
    /// top of it. Close it again with `end_page`.
    ///
    /// The existing content is wrapped in `q`/`Q` so graphics state left
    /// over from the first pass does not leak into the overlay.
    pub fn open_page(&mut self, page_num: usize) -> Result<()> {
        self.close_current();
        if page_num == 0 || page_num > self.completed {
            return Err(DrawError::PageOutOfRange {
                page: page_num,
                total: self.completed,
            });
        }
        let index = page_num - 1;
        let page = &mut self.pages[index];
        let mut wrapped = Vec::with_capacity(page.content.len() + 4);
        wrapped.extend_from_slice(b"q\n");
        wrapped.append(&mut page.content);
        wrapped.extend_from_slice(b"Q\n");
        page.content = wrapped;
        self.current = Some(index);
        Ok(())
    }

    fn page(&mut self) -> &mut Page {
        let index = self
            .current
            .expect("drawing operation called with no open page");
        &mut self.pages[index]
    }

    fn push_op(&mut self, op: String) -> &mut Self {
        self.page().content.extend_from_slice(op.as_bytes());
        self
    }

    // -------------------------------------------------------
    // Graphics state and paths
    // -------------------------------------------------------

    pub fn save_state(&mut self) -> &mut Self {
        self.push_op("q\n".to_string())
    }

    pub fn restore_state(&mut self) -> &mut Self {
        self.push_op("Q\n".to_string())
    }

    pub fn set_fill_color(&mut self, color: Color) -> &mut Self {
        self.push_op(format!("{} rg\n", color_operands(color)))
    }

    pub fn set_stroke_color(&mut self, color: Color) -> &mut Self {
        self.push_op(format!("{} RG\n", color_operands(color)))
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.push_op(format!("{} w\n", format_number(width)))
    }

    /// Append a rectangle path; `(x, y)` is its bottom-left corner.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.push_op(format!(
            "{} {} {} {} re\n",
            format_number(x),
            format_number(y),
            format_number(width),
            format_number(height),
        ))
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(format!("{} {} m\n", format_number(x), format_number(y)))
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.push_op(format!("{} {} l\n", format_number(x), format_number(y)))
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.push_op("S\n".to_string())
    }

    pub fn fill(&mut self) -> &mut Self {
        self.push_op("f\n".to_string())
    }

    pub fn fill_stroke(&mut self) -> &mut Self {
        self.push_op("B\n".to_string())
    }

    // -------------------------------------------------------
    // Text
    // -------------------------------------------------------

    /// Place text with the default 12pt Helvetica; `y` is the baseline.
    pub fn place_text(&mut self, text: &str, x: f64, y: f64) -> &mut Self {
        self.place_text_styled(text, x, y, &TextStyle::default())
    }

    /// Place text in the current fill color.
    pub fn place_text_styled(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> &mut Self {
        let mut op = format!(
            "BT\n/{} {} Tf\n{} {} Td\n(",
            style.font.pdf_name(),
            format_number(style.font_size),
            format_number(x),
            format_number(y),
        )
        .into_bytes();
        op.extend_from_slice(&encode_pdf_string(text));
        op.extend_from_slice(b") Tj\nET\n");
        self.page().content.extend_from_slice(&op);
        self
    }

    /// Place text anchored at `x` according to `align`.
    pub fn place_text_aligned(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        style: &TextStyle,
        align: TextAlign,
    ) -> &mut Self {
        let width = style.measure(text);
        let left = match align {
            TextAlign::Left => x,
            TextAlign::Center => x - width / 2.0,
            TextAlign::Right => x - width,
        };
        self.place_text_styled(text, left, y, style)
    }

    // -------------------------------------------------------
    // Images
    // -------------------------------------------------------

    /// Decode JPEG/PNG bytes and register the image.
    pub fn load_image_bytes(&mut self, data: Vec<u8>) -> Result<ImageId> {
        let image = load_image(data)?;
        Ok(self.add_image(image))
    }

    /// Register an already decoded image.
    pub fn add_image(&mut self, image: ImageData) -> ImageId {
        self.images.push(image);
        ImageId(self.images.len() - 1)
    }

    /// Draw an image scaled into the box whose bottom-left corner is
    /// `(x, y)`.
    pub fn place_image(&mut self, id: ImageId, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.page().images.insert(id.0);
        self.push_op(format!(
            "q\n{} 0 0 {} {} {} cm\n/Im{} Do\nQ\n",
            format_number(width),
            format_number(height),
            format_number(x),
            format_number(y),
            id.0,
        ))
    }

    // -------------------------------------------------------
    // Output
    // -------------------------------------------------------

    /// Write the whole document and return the writer.
    pub fn end_document(mut self) -> Result<W> {
        self.close_current();
        let compress = self.compress;
        let mut out = PdfWriter::new(self.writer);
        out.write_header()?;

        let mut next_obj = FIRST_FONT_OBJ_NUM;
        let mut font_entries = Vec::new();
        for font in BuiltinFont::ALL {
            let id = ObjId(next_obj, 0);
            next_obj += 1;
            out.write_object(
                id,
                &PdfObject::dict(vec![
                    ("Type", PdfObject::name("Font")),
                    ("Subtype", PdfObject::name("Type1")),
                    ("BaseFont", PdfObject::name(font.pdf_base_name())),
                    ("Encoding", PdfObject::name("WinAnsiEncoding")),
                ]),
            )?;
            font_entries.push((font.pdf_name(), PdfObject::Reference(id)));
        }

        let mut image_ids = Vec::with_capacity(self.images.len());
        for image in &self.images {
            let smask = match &image.alpha {
                Some(alpha) => {
                    let id = ObjId(next_obj, 0);
                    next_obj += 1;
                    let mask = ImageData {
                        width: image.width,
                        height: image.height,
                        encoding: ImageEncoding::Raw,
                        color_space: crate::images::ColorSpace::DeviceGray,
                        data: alpha.clone(),
                        alpha: None,
                    };
                    out.write_object(id, &image_xobject(&mask, None)?)?;
                    Some(id)
                }
                None => None,
            };
            let id = ObjId(next_obj, 0);
            next_obj += 1;
            out.write_object(id, &image_xobject(image, smask)?)?;
            image_ids.push(id);
        }

        let mut kids = Vec::with_capacity(self.pages.len());
        for page in &self.pages {
            let content_id = ObjId(next_obj, 0);
            let page_id = ObjId(next_obj + 1, 0);
            next_obj += 2;

            let content = if compress {
                PdfObject::stream(
                    vec![("Filter", PdfObject::name("FlateDecode"))],
                    deflate(&page.content)?,
                )
            } else {
                PdfObject::stream(vec![], page.content.clone())
            };
            out.write_object(content_id, &content)?;

            let fonts = font_entries
                .iter()
                .map(|(name, obj)| (*name, obj.clone()))
                .collect();
            let mut resources = vec![("Font", PdfObject::dict(fonts))];
            if !page.images.is_empty() {
                let names: Vec<String> = page.images.iter().map(|i| format!("Im{}", i)).collect();
                let xobjects = page
                    .images
                    .iter()
                    .zip(&names)
                    .map(|(i, name)| (name.as_str(), PdfObject::Reference(image_ids[*i])))
                    .collect();
                resources.push(("XObject", PdfObject::dict(xobjects)));
            }

            out.write_object(
                page_id,
                &PdfObject::dict(vec![
                    ("Type", PdfObject::name("Page")),
                    ("Parent", PAGES_OBJ.into()),
                    ("MediaBox", PdfObject::rect(0.0, 0.0, page.width, page.height)),
                    ("Contents", content_id.into()),
                    ("Resources", PdfObject::dict(resources)),
                ]),
            )?;
            kids.push(PdfObject::Reference(page_id));
        }

        let info_id = if self.info.is_empty() {
            None
        } else {
            let id = ObjId(next_obj, 0);
            let entries = self
                .info
                .iter()
                .map(|(k, v)| (k.as_str(), PdfObject::literal_string(v)))
                .collect();
            out.write_object(id, &PdfObject::dict(entries))?;
            Some(id)
        };

        let page_count = kids.len() as i64;
        out.write_object(
            PAGES_OBJ,
            &PdfObject::dict(vec![
                ("Type", PdfObject::name("Pages")),
                ("Kids", PdfObject::Array(kids)),
                ("Count", PdfObject::Integer(page_count)),
            ]),
        )?;
        out.write_object(
            CATALOG_OBJ,
            &PdfObject::dict(vec![
                ("Type", PdfObject::name("Catalog")),
                ("Pages", PAGES_OBJ.into()),
            ]),
        )?;
        out.write_xref_and_trailer(CATALOG_OBJ, info_id)?;

        let mut writer = out.into_inner();
        writer.flush()?;
        Ok(writer)
    }
}

fn color_operands(color: Color) -> String {
    format!(
        "{} {} {}",
        format_number(color.r),
        format_number(color.g),
        format_number(color.b),
    )
}

fn deflate(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

fn image_xobject(image: &ImageData, smask: Option<ObjId>) -> Result<PdfObject> {
    let (filter, data) = match image.encoding {
        ImageEncoding::Jpeg => ("DCTDecode", image.data.clone()),
        ImageEncoding::Raw => ("FlateDecode", deflate(&image.data)?),
    };
    let mut dict = vec![
        ("Type", PdfObject::name("XObject")),
        ("Subtype", PdfObject::name("Image")),
        ("Width", PdfObject::Integer(image.width as i64)),
        ("Height", PdfObject::Integer(image.height as i64)),
        ("ColorSpace", PdfObject::name(image.color_space.pdf_name())),
        ("BitsPerComponent", PdfObject::Integer(8)),
        ("Filter", PdfObject::name(filter)),
    ];
    if let Some(id) = smask {
        dict.push(("SMask", id.into()));
    }
    Ok(PdfObject::stream(dict, data))
}
