//! Office Open XML presentation encoder.
//!
//! Emits the smallest package PowerPoint and LibreOffice accept: one blank
//! master, layout and theme, then a slide part and media part per slide.

use std::io::{Seek, Write};
use zip::{CompressionMethod, ZipWriter};
use zip::write::SimpleFileOptions;
use crate::deck::Deck;
use crate::error::DeckError;
use crate::slide::{Frame, Label, MediaFormat, Picture, Slide};

const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const NS_PML: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;

const REL_OFFICE_DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_EXTENDED_PROPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
const REL_SLIDE_MASTER: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_PRES_PROPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_PRESENTATION: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
const CT_SLIDE_MASTER: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str = "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_PRES_PROPS: &str = "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";
const CT_EXTENDED_PROPS: &str = "application/vnd.openxmlformats-officedocument.extended-properties+xml";

// Slide ids below 256 are reserved
const FIRST_SLIDE_ID: usize = 256;
// Relationship ids rId1..rId3 of presentation.xml are master, theme, presProps
const FIRST_SLIDE_REL: usize = 4;

/// Serializes `deck` as a `.pptx` package into `writer` and hands it back.
pub fn encode<W: Write + Seek>(deck: &Deck, writer: W) -> Result<W, DeckError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let put = |zip: &mut ZipWriter<W>, name: &str, data: &[u8]| -> Result<(), DeckError> {
        zip.start_file(name, options)?;
        zip.write_all(data).map_err(|e| DeckError::io(name, e))?;
        Ok(())
    };

    put(&mut zip, "[Content_Types].xml", content_types(deck).as_bytes())?;
    put(&mut zip, "_rels/.rels", root_rels().as_bytes())?;
    put(&mut zip, "docProps/core.xml", core_props(deck).as_bytes())?;
    put(&mut zip, "docProps/app.xml", app_props(deck).as_bytes())?;
    put(&mut zip, "ppt/presentation.xml", presentation(deck).as_bytes())?;
    put(&mut zip, "ppt/_rels/presentation.xml.rels", presentation_rels(deck).as_bytes())?;
    put(&mut zip, "ppt/presProps.xml", pres_props().as_bytes())?;
    put(&mut zip, "ppt/slideMasters/slideMaster1.xml", slide_master().as_bytes())?;
    put(&mut zip, "ppt/slideMasters/_rels/slideMaster1.xml.rels", slide_master_rels().as_bytes())?;
    put(&mut zip, "ppt/slideLayouts/slideLayout1.xml", slide_layout().as_bytes())?;
    put(&mut zip, "ppt/slideLayouts/_rels/slideLayout1.xml.rels", slide_layout_rels().as_bytes())?;
    put(&mut zip, "ppt/theme/theme1.xml", THEME.as_bytes())?;

    for (i, slide) in deck.slides().iter().enumerate() {
        let n = i + 1;
        put(&mut zip, &format!("ppt/slides/slide{}.xml", n), slide_xml(slide).as_bytes())?;
        put(&mut zip, &format!("ppt/slides/_rels/slide{}.xml.rels", n), slide_rels(n, slide).as_bytes())?;
        if let Some(picture) = &slide.picture {
            put(&mut zip, &media_name(n, picture.media.format), &picture.media.bytes)?;
        }
    }

    Ok(zip.finish()?)
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters other than tab/newline are not legal in XML 1.0
            c if (c as u32) < 0x20 && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

fn media_name(slide_number: usize, format: MediaFormat) -> String {
    format!("ppt/media/image{}.{}", slide_number, format.extension())
}

fn relationships(rels: &[(String, &str, String)]) -> String {
    let mut xml = format!(
        r#"{}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        XML_HEADER
    );
    for (id, kind, target) in rels {
        xml.push_str(&format!(r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#, id, kind, escape(target)));
    }
    xml.push_str("</Relationships>");
    xml
}

fn content_types(deck: &Deck) -> String {
    let mut xml = format!(
        r#"{}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/>"#,
        XML_HEADER
    );
    for format in [MediaFormat::Jpeg, MediaFormat::Png] {
        xml.push_str(&format!(
            r#"<Default Extension="{}" ContentType="{}"/>"#,
            format.extension(),
            format.content_type()
        ));
    }

    let parts = [
        ("/ppt/presentation.xml", CT_PRESENTATION),
        ("/ppt/presProps.xml", CT_PRES_PROPS),
        ("/ppt/slideMasters/slideMaster1.xml", CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml", CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml", CT_THEME),
        ("/docProps/core.xml", CT_CORE_PROPS),
        ("/docProps/app.xml", CT_EXTENDED_PROPS),
    ];
    for (part, content_type) in parts {
        xml.push_str(&format!(r#"<Override PartName="{}" ContentType="{}"/>"#, part, content_type));
    }
    for n in 1..=deck.len() {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{}.xml" ContentType="{}"/>"#,
            n, CT_SLIDE
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn root_rels() -> String {
    relationships(&[
        ("rId1".to_string(), REL_OFFICE_DOCUMENT, "ppt/presentation.xml".to_string()),
        ("rId2".to_string(), REL_CORE_PROPS, "docProps/core.xml".to_string()),
        ("rId3".to_string(), REL_EXTENDED_PROPS, "docProps/app.xml".to_string()),
    ])
}

fn core_props(deck: &Deck) -> String {
    format!(
        r#"{}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"><dc:title>{}</dc:title><dc:creator>photodeck</dc:creator></cp:coreProperties>"#,
        XML_HEADER,
        escape(deck.title())
    )
}

fn app_props(deck: &Deck) -> String {
    format!(
        r#"{}<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"><Application>photodeck</Application><Slides>{}</Slides></Properties>"#,
        XML_HEADER,
        deck.len()
    )
}

fn presentation(deck: &Deck) -> String {
    let mut xml = format!(
        r#"{}<p:presentation {} saveSubsetFonts="1"><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#,
        XML_HEADER, NS_PML
    );
    // An empty sldIdLst is not allowed; leave it out for a deck without slides
    if !deck.is_empty() {
        xml.push_str("<p:sldIdLst>");
        for i in 0..deck.len() {
            xml.push_str(&format!(
                r#"<p:sldId id="{}" r:id="rId{}"/>"#,
                FIRST_SLIDE_ID + i,
                FIRST_SLIDE_REL + i
            ));
        }
        xml.push_str("</p:sldIdLst>");
    }
    xml.push_str(&format!(
        r#"<p:sldSz cx="{}" cy="{}"/><p:notesSz cx="{}" cy="{}"/></p:presentation>"#,
        deck.width(),
        deck.height(),
        deck.height(),
        deck.width()
    ));
    xml
}

fn presentation_rels(deck: &Deck) -> String {
    let mut rels = vec![
        ("rId1".to_string(), REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "theme/theme1.xml".to_string()),
        ("rId3".to_string(), REL_PRES_PROPS, "presProps.xml".to_string()),
    ];
    for i in 0..deck.len() {
        rels.push((
            format!("rId{}", FIRST_SLIDE_REL + i),
            REL_SLIDE,
            format!("slides/slide{}.xml", i + 1),
        ));
    }
    relationships(&rels)
}

fn pres_props() -> String {
    format!("{}<p:presentationPr {}/>", XML_HEADER, NS_PML)
}

const EMPTY_TREE: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

fn slide_master() -> String {
    format!(
        r#"{}<p:sldMaster {}><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree>{}</p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#,
        XML_HEADER,
        NS_PML,
        EMPTY_TREE
    )
}

fn slide_master_rels() -> String {
    relationships(&[
        ("rId1".to_string(), REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml".to_string()),
        ("rId2".to_string(), REL_THEME, "../theme/theme1.xml".to_string()),
    ])
}

fn slide_layout() -> String {
    format!(
        r#"{}<p:sldLayout {} type="blank" preserve="1"><p:cSld name="Blank"><p:spTree>{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#,
        XML_HEADER,
        NS_PML,
        EMPTY_TREE
    )
}

fn slide_layout_rels() -> String {
    relationships(&[(
        "rId1".to_string(),
        REL_SLIDE_MASTER,
        "../slideMasters/slideMaster1.xml".to_string(),
    )])
}

fn slide_rels(slide_number: usize, slide: &Slide) -> String {
    let mut rels = vec![(
        "rId1".to_string(),
        REL_SLIDE_LAYOUT,
        "../slideLayouts/slideLayout1.xml".to_string(),
    )];
    if let Some(picture) = &slide.picture {
        rels.push((
            "rId2".to_string(),
            REL_IMAGE,
            format!("../media/image{}.{}", slide_number, picture.media.format.extension()),
        ));
    }
    relationships(&rels)
}

fn xfrm(frame: &Frame) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        frame.left, frame.top, frame.width, frame.height
    )
}

fn picture_xml(picture: &Picture) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="2" name="Picture 1"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        xfrm(&picture.frame)
    )
}

fn label_xml(label: &Label) -> String {
    let border = match label.border {
        Some(width) => format!(
            r#"<a:ln w="{}"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:ln>"#,
            width,
            label.text_color.hex()
        ),
        None => String::new(),
    };
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="3" name="TextBox 2"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:solidFill><a:srgbClr val="{}"/></a:solidFill>{}</p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0" anchor="ctr"/><a:lstStyle/><a:p><a:pPr algn="ctr"/><a:r><a:rPr lang="en-US" sz="{}" b="1" dirty="0"><a:solidFill><a:srgbClr val="{}"/></a:solidFill></a:rPr><a:t>{}</a:t></a:r></a:p></p:txBody></p:sp>"#,
        xfrm(&label.frame),
        label.fill.hex(),
        border,
        label.font_size_pt * 100,
        label.text_color.hex(),
        escape(&label.text)
    )
}

fn slide_xml(slide: &Slide) -> String {
    let picture = slide.picture.as_ref().map(picture_xml).unwrap_or_default();
    format!(
        r#"{}<p:sld {}><p:cSld><p:spTree>{}{}{}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#,
        XML_HEADER,
        NS_PML,
        EMPTY_TREE,
        picture,
        label_xml(&slide.label)
    )
}

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Office Theme"><a:themeElements><a:clrScheme name="Office"><a:dk1><a:sysClr val="windowText" lastClr="000000"/></a:dk1><a:lt1><a:sysClr val="window" lastClr="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="1F497D"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Office"><a:majorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Office"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements><a:objectDefaults/><a:extraClrSchemeLst/></a:theme>"#;
