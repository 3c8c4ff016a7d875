//! MTL parser: fills Phong coefficients and diffuse texture paths into
//! materials created by the geometry pass.

use std::{
    collections::HashMap,
    io::{self, BufRead},
    path::PathBuf,
};

use crate::{
    error::{LoadError, LoadResult},
    material::Material,
    obj::{lossy_lines, parse_f32, rest_of_line},
};

/// Apply an MTL file to `materials`, matching `newmtl` blocks by name.
///
/// Blocks for names no submesh uses are skipped. `map_Kd` paths are stored
/// exactly as written; resolving them against a directory is the caller's job.
pub fn parse_mtl<R: BufRead>(reader: R, materials: &mut [Material]) -> LoadResult<()> {
    let lookup: HashMap<String, usize> = materials
        .iter()
        .enumerate()
        .rev()
        .map(|(idx, m)| (m.name.clone(), idx))
        .collect();
    let mut current: Option<usize> = None;

    for (line_no, line) in lossy_lines(reader).enumerate() {
        let line = line.map_err(|e| LoadError::read(line_no, e))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut parts = trimmed.split_whitespace();
        let Some(tag) = parts.next() else {
            continue;
        };

        if tag == "newmtl" {
            let name = rest_of_line(trimmed, tag);
            current = lookup.get(name).copied();
            if current.is_none() {
                log::debug!("MTL material '{}' is not used by any submesh", name);
            }
            continue;
        }

        let Some(idx) = current else {
            log::debug!("Ignoring MTL '{}' on line {} outside a used material", tag, line_no + 1);
            continue;
        };
        let material = &mut materials[idx];

        match tag {
            "Ns" => material.ns = parse_f32(parts.next(), line_no, "Ns exponent")?,
            "Ka" => material.ka = parse_rgb(&mut parts, line_no, "Ka")?,
            "Kd" => material.kd = parse_rgb(&mut parts, line_no, "Kd")?,
            "Ks" => material.ks = parse_rgb(&mut parts, line_no, "Ks")?,
            "map_Kd" => {
                let mut tokens = parts.peekable();
                if tokens.peek() == Some(&"-o") {
                    // -o u v w
                    tokens.nth(3);
                }
                let path = tokens.collect::<Vec<_>>().join(" ");
                if path.is_empty() {
                    return Err(LoadError::malformed(line_no, "map_Kd without a path"));
                }
                material.map_kd_path = Some(PathBuf::from(path));
            }
            other => {
                log::debug!("Ignoring MTL directive '{}' on line {}", other, line_no + 1);
            }
        }
    }

    Ok(())
}

/// Convenience helper to parse an MTL string literal.
pub fn parse_mtl_str(contents: &str, materials: &mut [Material]) -> LoadResult<()> {
    parse_mtl(io::Cursor::new(contents), materials)
}

fn parse_rgb<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    line_no: usize,
    what: &str,
) -> LoadResult<[f32; 3]> {
    let r = parse_f32(parts.next(), line_no, &format!("{} red", what))?;
    let g = parse_f32(parts.next(), line_no, &format!("{} green", what))?;
    let b = parse_f32(parts.next(), line_no, &format!("{} blue", what))?;
    Ok([r, g, b])
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn materials(names: &[&str]) -> Vec<Material> {
        names.iter().map(|n| Material::new(*n)).collect()
    }

    #[test]
    fn kd_only_leaves_other_coefficients_default() {
        let mut mats = materials(&["Foo"]);
        parse_mtl_str("newmtl Foo\nKd 1.0 0.0 0.0\n", &mut mats).expect("parse");
        assert_eq!(mats[0].kd, [1.0, 0.0, 0.0]);
        assert_eq!(mats[0].ka, [0.0; 3]);
        assert_eq!(mats[0].ks, [0.0; 3]);
        assert_eq!(mats[0].ns, 0.0);
    }

    #[test]
    fn blocks_match_by_name_not_order() {
        let src = r#"
            newmtl Eyes
            Ns 96.0
            Ka 0.1 0.1 0.1
            Ks 0.5 0.5 0.5
            newmtl Body
            Kd 0.8 0.6 0.4
            map_Kd body.png
        "#;
        let mut mats = materials(&["Body", "Eyes"]);
        parse_mtl_str(src, &mut mats).expect("parse");
        assert_eq!(mats[0].kd, [0.8, 0.6, 0.4]);
        assert_eq!(mats[0].map_kd_path.as_deref(), Some(Path::new("body.png")));
        assert_eq!(mats[1].ns, 96.0);
        assert_eq!(mats[1].ka, [0.1, 0.1, 0.1]);
        assert_eq!(mats[1].ks, [0.5, 0.5, 0.5]);
        assert!(mats[1].map_kd_path.is_none());
    }

    #[test]
    fn map_kd_offset_option_is_skipped() {
        let mut mats = materials(&["Foo"]);
        parse_mtl_str("newmtl Foo\nmap_Kd -o 0.5 0.25 0 tex/skin.png\n", &mut mats)
            .expect("parse");
        assert_eq!(
            mats[0].map_kd_path.as_deref(),
            Some(Path::new("tex/skin.png"))
        );
    }

    #[test]
    fn unused_material_block_does_not_leak_into_previous() {
        let src = "newmtl Foo\nKd 0 1 0\nnewmtl Unused\nKd 1 1 1\nNs 10\n";
        let mut mats = materials(&["Foo"]);
        parse_mtl_str(src, &mut mats).expect("parse");
        assert_eq!(mats[0].kd, [0.0, 1.0, 0.0]);
        assert_eq!(mats[0].ns, 0.0);
    }

    #[test]
    fn properties_before_newmtl_are_ignored() {
        let mut mats = materials(&["Foo"]);
        parse_mtl_str("Kd 1 1 1\nillum 2\n", &mut mats).expect("parse");
        assert_eq!(mats[0].kd, [0.0; 3]);
    }

    #[test]
    fn short_color_is_malformed() {
        let mut mats = materials(&["Foo"]);
        match parse_mtl_str("newmtl Foo\nKa 0.1 0.2\n", &mut mats) {
            Err(LoadError::Malformed { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("Ka blue"));
            }
            other => panic!("expected malformed error, got {:?}", other),
        }
    }

    #[test]
    fn latin1_names_match_the_geometry_pass() {
        let mut mats = materials(&["Cr\u{FFFD}me"]);
        let src: &[u8] = b"newmtl Cr\xe8me\nKd 1 0.9 0.8\n";
        parse_mtl(io::Cursor::new(src), &mut mats).expect("parse latin-1");
        assert_eq!(mats[0].kd, [1.0, 0.9, 0.8]);
    }
}
