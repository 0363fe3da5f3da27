use cgmath::Vector3;

use crate::{
    error::{SceneError, SceneResult},
    math::Vec3,
    scene_pkg::material::Material,
};

use super::resource::file_name_argument;

fn parse_floats<const N: usize>(
    parts: &[&str],
    directive: &str,
    source: &str,
    line: usize,
) -> SceneResult<[f32; N]> {
    if parts.len() != N {
        return Err(SceneError::malformed(
            source,
            line,
            format!("`{directive}` needs exactly {N} values, found {}", parts.len()),
        ));
    }
    let mut values = [0.0; N];
    for (value, part) in values.iter_mut().zip(parts) {
        *value = part.parse().map_err(|_| {
            SceneError::malformed(
                source,
                line,
                format!("`{directive}` value `{part}` is not a number"),
            )
        })?;
    }
    Ok(values)
}

fn parse_color(parts: &[&str], directive: &str, source: &str, line: usize) -> SceneResult<Vec3> {
    let [r, g, b] = parse_floats::<3>(parts, directive, source, line)?;
    Ok(Vector3::new(r, g, b))
}

/// Parses the MTL subset into a single material, starting from [`Material::default`].
pub fn parse_mtl(text: &str, source: &str) -> SceneResult<Material> {
    let mut material = Material::default();

    for (number, line) in text.lines().enumerate() {
        let line_number = number + 1;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&directive, args)) = parts.split_first() else {
            continue;
        };
        match directive {
            "Ka" => material.ka = parse_color(args, directive, source, line_number)?,
            "Kd" => material.kd = parse_color(args, directive, source, line_number)?,
            "Ks" => material.ks = parse_color(args, directive, source, line_number)?,
            "Ns" => {
                let [alpha] = parse_floats::<1>(args, directive, source, line_number)?;
                material.alpha = alpha;
            }
            "map_Kd" => material.texture_file = file_name_argument(args.iter().copied()),
            "map_Bump" => material.normal_map_file = file_name_argument(args.iter().copied()),
            _ => {}
        }
    }

    log::debug!(
        "{source}: texture {:?}, normal map {:?}",
        material.texture_file,
        material.normal_map_file
    );
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn reads_coefficients_and_maps() {
        let text = "\
newmtl brick
Ka 0.1 0.2 0.3
Kd 0.4 0.5 0.6
Ks 1 1 1
Ns 64
map_Kd brick.png
map_Bump brick_normal.png
illum 2
";
        let material = parse_mtl(text, "brick.mtl").unwrap();
        assert_eq!(material.ka, Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(material.kd, Vector3::new(0.4, 0.5, 0.6));
        assert_eq!(material.ks, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(material.alpha, 64.0);
        assert_eq!(material.texture_file.as_deref(), Some("brick.png"));
        assert_eq!(material.normal_map_file.as_deref(), Some("brick_normal.png"));
    }

    #[test]
    fn unspecified_values_keep_defaults() {
        let material = parse_mtl("Kd 1 0 0\n", "red.mtl").unwrap();
        let default = Material::default();
        assert_eq!(material.kd, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(material.ka, default.ka);
        assert_eq!(material.ks, default.ks);
        assert_eq!(material.alpha, default.alpha);
        assert!(material.texture_file.is_none());
    }

    #[test]
    fn texture_names_may_contain_spaces() {
        let text = "map_Kd old brick.png\nmap_Bump old  brick n.png\n";
        let material = parse_mtl(text, "old.mtl").unwrap();
        assert_eq!(material.texture_file.as_deref(), Some("old brick.png"));
        assert_eq!(material.normal_map_file.as_deref(), Some("old brick n.png"));
    }

    #[test]
    fn empty_map_means_no_texture() {
        let material = parse_mtl("map_Kd\n", "blank.mtl").unwrap();
        assert!(material.texture_file.is_none());
    }

    #[rstest]
    #[case::short_color("Ka 1 1\n", 1)]
    #[case::long_color("Kd 1 1 1 1\n", 1)]
    #[case::non_numeric_exponent("Ka 0 0 0\nNs shiny\n", 2)]
    fn rejects_malformed_lines(#[case] text: &str, #[case] expected_line: usize) {
        match parse_mtl(text, "bad.mtl") {
            Err(SceneError::MalformedInput { line, .. }) => assert_eq!(line, expected_line),
            other => panic!("expected malformed input, got {other:?}"),
        }
    }
}
