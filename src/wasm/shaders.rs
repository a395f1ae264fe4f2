use crate::render::ShaderKind;

const MVP_VERTEX: &str = r#"#version 300 es
in vec4 a_Position;
uniform mat4 u_Matrix;

void main() {
  gl_Position = u_Matrix * a_Position;
}
"#;

const MAGENTA_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
out vec4 cg_FragColor;

void main() {
  cg_FragColor = vec4(1.0, 0.0, 1.0, 1.0);
}
"#;

const COLOR_FRAGMENT: &str = r#"#version 300 es
precision mediump float;
uniform vec4 u_Color;
out vec4 cg_FragColor;

void main() {
  cg_FragColor = u_Color;
}
"#;

/// Vertex and fragment source for `kind`. Both programs share the vertex
/// stage: it only differs in what the matrix means (MVP vs model).
pub fn sources(kind: ShaderKind) -> (&'static str, &'static str) {
    match kind {
        ShaderKind::FixedMagenta => (MVP_VERTEX, MAGENTA_FRAGMENT),
        ShaderKind::ModelColor => (MVP_VERTEX, COLOR_FRAGMENT),
    }
}
