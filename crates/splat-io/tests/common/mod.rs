//! Builders for source PLY files shaped like reconstruction output.

#![allow(dead_code)]

/// Vertex properties in the order the reconstruction model writes them.
pub const SOURCE_PROPERTIES: [&str; 14] = [
    "x", "y", "z", "f_dc_0", "f_dc_1", "f_dc_2", "opacity", "scale_0", "scale_1", "scale_2",
    "rot_0", "rot_1", "rot_2", "rot_3",
];

/// Source PLY with the given vertex rows (in [`SOURCE_PROPERTIES`] order),
/// followed by camera metadata elements that standardization must drop.
pub fn source_ply(rows: &[[f32; 14]]) -> Vec<u8> {
    let mut header = String::from("ply\nformat binary_little_endian 1.0\n");
    header.push_str(&format!("element vertex {}\n", rows.len()));
    for name in SOURCE_PROPERTIES {
        header.push_str(&format!("property float {name}\n"));
    }
    header.push_str("element extrinsic 16\nproperty float extrinsic\n");
    header.push_str("element intrinsic 9\nproperty float intrinsic\n");
    header.push_str("element image_size 2\nproperty uint image_size\n");
    header.push_str("element color_space 1\nproperty uchar color_space\n");
    header.push_str("element version 3\nproperty uchar version\n");
    header.push_str("end_header\n");

    let mut bytes = header.into_bytes();
    for row in rows {
        for v in row {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
    }
    for i in 0..16 {
        let v = if i % 5 == 0 { 1.0f32 } else { 0.0 };
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    for v in [500.0f32, 0.0, 320.0, 0.0, 500.0, 240.0, 0.0, 0.0, 1.0] {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes.extend_from_slice(&640u32.to_le_bytes());
    bytes.extend_from_slice(&480u32.to_le_bytes());
    bytes.push(1);
    bytes.extend_from_slice(&[1, 5, 0]);
    bytes
}

/// A plausible finite source row; `w` is written to `rot_0`.
pub fn source_row(x: f32, w: f32) -> [f32; 14] {
    [
        x, x + 1.0, x + 2.0, 0.2, -0.4, 0.6, 1.5, -3.0, -2.5, -2.0, w, 0.1, 0.2, 0.3,
    ]
}
