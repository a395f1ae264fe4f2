use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader,
    WebGlUniformLocation,
};

use super::shaders;
use crate::demos::DemoKind;
use crate::driver::AnimationDriver;
use crate::error::{RenderError, RenderResult};
use crate::geometry::GeometryBuffer;
use crate::render::{
    check_range, BufferHandle, DrawCall, DrawRange, Primitive, RenderBackend, ShaderKind,
};

struct Program {
    program: WebGlProgram,
    position: u32,
    matrix: WebGlUniformLocation,
    color: Option<WebGlUniformLocation>,
}

struct Uploaded {
    geometry: GeometryBuffer,
    vertices: WebGlBuffer,
    indices: Option<WebGlBuffer>,
}

/// [`RenderBackend`] over a WebGL2 context.
pub struct WebGlBackend {
    gl: GL,
    canvas: HtmlCanvasElement,
    magenta: Program,
    model_color: Program,
    buffers: Vec<Uploaded>,
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> RenderResult<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| RenderError::Shader("unable to create shader object".into()))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(RenderError::Shader(log))
    }
}

fn link_program(gl: &GL, kind: ShaderKind) -> RenderResult<Program> {
    let (vs, fs) = shaders::sources(kind);
    let vs = compile_shader(gl, GL::VERTEX_SHADER, vs)?;
    let fs = compile_shader(gl, GL::FRAGMENT_SHADER, fs)?;

    let program = gl
        .create_program()
        .ok_or_else(|| RenderError::Program("unable to create program object".into()))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);

    if !gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        return Err(RenderError::Program(
            gl.get_program_info_log(&program).unwrap_or_default(),
        ));
    }

    let position = gl.get_attrib_location(&program, "a_Position");
    if position < 0 {
        return Err(RenderError::Program("a_Position not found".into()));
    }
    let matrix = gl
        .get_uniform_location(&program, "u_Matrix")
        .ok_or_else(|| RenderError::Program("u_Matrix not found".into()))?;
    let color = gl.get_uniform_location(&program, "u_Color");

    Ok(Program {
        program,
        position: position as u32,
        matrix,
        color,
    })
}

fn mode(primitive: Primitive) -> u32 {
    match primitive {
        Primitive::LineLoop => GL::LINE_LOOP,
        Primitive::TriangleFan => GL::TRIANGLE_FAN,
        Primitive::TriangleStrip => GL::TRIANGLE_STRIP,
    }
}

impl WebGlBackend {
    pub fn new(canvas: HtmlCanvasElement) -> RenderResult<Self> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(|e| RenderError::Context(format!("{e:?}")))?
            .ok_or_else(|| RenderError::Context("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| RenderError::Context("context is not WebGL2".into()))?;

        let magenta = link_program(&gl, ShaderKind::FixedMagenta)?;
        let model_color = link_program(&gl, ShaderKind::ModelColor)?;
        Ok(Self {
            gl,
            canvas,
            magenta,
            model_color,
            buffers: Vec::new(),
        })
    }

    fn program(&self, kind: ShaderKind) -> &Program {
        match kind {
            ShaderKind::FixedMagenta => &self.magenta,
            ShaderKind::ModelColor => &self.model_color,
        }
    }
}

impl RenderBackend for WebGlBackend {
    fn upload(&mut self, geometry: &GeometryBuffer) -> RenderResult<BufferHandle> {
        let gl = &self.gl;
        let vertices = gl
            .create_buffer()
            .ok_or_else(|| RenderError::Buffer("vertex buffer".into()))?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        gl.buffer_data_with_u8_array(GL::ARRAY_BUFFER, geometry.as_bytes(), GL::STATIC_DRAW);

        let indices = if geometry.is_indexed() {
            let ibo = gl
                .create_buffer()
                .ok_or_else(|| RenderError::Buffer("index buffer".into()))?;
            gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ibo));
            gl.buffer_data_with_u8_array(GL::ELEMENT_ARRAY_BUFFER, geometry.index_bytes(), GL::STATIC_DRAW);
            Some(ibo)
        } else {
            None
        };

        let handle = BufferHandle(self.buffers.len() as u32);
        self.buffers.push(Uploaded {
            geometry: geometry.clone(),
            vertices,
            indices,
        });
        Ok(handle)
    }

    fn begin_frame(&mut self, clear: [f32; 4]) -> RenderResult<()> {
        self.gl
            .viewport(0, 0, self.canvas.width() as i32, self.canvas.height() as i32);
        self.gl.clear_color(clear[0], clear[1], clear[2], clear[3]);
        self.gl.clear(GL::COLOR_BUFFER_BIT);
        Ok(())
    }

    fn draw(&mut self, call: &DrawCall) -> RenderResult<()> {
        let uploaded = self
            .buffers
            .get(call.buffer.0 as usize)
            .ok_or(RenderError::UnknownBuffer(call.buffer))?;
        check_range(&uploaded.geometry, call.range)?;

        let gl = &self.gl;
        let program = self.program(call.shader);
        gl.use_program(Some(&program.program));

        let components = uploaded.geometry.components() as i32;
        let first = match call.range {
            DrawRange::Arrays { offset, .. } => offset,
            DrawRange::Elements { .. } => 0,
        };
        // shapes are addressed by moving the attribute pointer, draws start at 0
        let byte_offset = first * uploaded.geometry.components() * std::mem::size_of::<f32>();
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&uploaded.vertices));
        gl.vertex_attrib_pointer_with_i32(program.position, components, GL::FLOAT, false, 0, byte_offset as i32);
        gl.enable_vertex_attrib_array(program.position);

        gl.uniform_matrix4fv_with_f32_array(Some(&program.matrix), false, &call.transform.to_cols_array());
        if let (Some(location), Some([r, g, b])) = (&program.color, call.color) {
            gl.uniform4f(Some(location), r, g, b, 1.0);
        }

        match call.range {
            DrawRange::Arrays { count, .. } => gl.draw_arrays(mode(call.primitive), 0, count as i32),
            DrawRange::Elements { count } => {
                let ibo = uploaded.indices.as_ref().ok_or(RenderError::MissingIndices)?;
                gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(ibo));
                gl.draw_elements_with_i32(mode(call.primitive), count as i32, GL::UNSIGNED_SHORT, 0);
            }
        }
        Ok(())
    }
}

fn now_ms() -> Result<f64, JsValue> {
    Ok(window().ok_or("no window")?.performance().ok_or("no performance")?.now())
}

/// Keeps the canvas square and as large as the window allows.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Result<(), JsValue> {
    let window = window().ok_or("no window")?;
    let w = window.inner_width()?.as_f64().unwrap_or(0.0);
    let h = window.inner_height()?.as_f64().unwrap_or(0.0);
    let side = w.min(h).max(1.0) as u32;
    canvas.set_width(side);
    canvas.set_height(side);
    Ok(())
}

/// Builds `kind`, uploads its geometry and starts the frame loop.
pub fn start(canvas: HtmlCanvasElement, kind: DemoKind) -> Result<(), JsValue> {
    fit_canvas(&canvas)?;
    let resize_closure = {
        let canvas = canvas.clone();
        Closure::wrap(Box::new(move || {
            if let Err(e) = fit_canvas(&canvas) {
                log::warn!("resize failed: {e:?}");
            }
        }) as Box<dyn FnMut()>)
    };
    window()
        .ok_or("no window")?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    let mut backend = WebGlBackend::new(canvas).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let demo = kind.build().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let mut driver = AnimationDriver::new(demo, &mut backend, now_ms()?)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    log::info!("{kind} demo started");

    // `f` holds the animation-frame closure so that it can re-register
    // itself with `request_animation_frame` from inside its own body.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        match driver.tick(now, &mut backend) {
            Ok(flow) if flow.is_continue() => {}
            Ok(_) => {
                log::info!("{kind} demo stopped after {} frames", driver.frames());
                return;
            }
            Err(e) => {
                log::error!("{kind} demo halted: {e}");
                return;
            }
        }

        let next = f
            .borrow()
            .as_ref()
            .map(|cb| window().map(|w| w.request_animation_frame(cb.as_ref().unchecked_ref())));
        if !matches!(next, Some(Some(Ok(_)))) {
            log::error!("could not schedule the next frame");
        }
    }) as Box<dyn FnMut(f64)>));

    window()
        .ok_or("no window")?
        .request_animation_frame(g.borrow().as_ref().ok_or("no frame callback")?.as_ref().unchecked_ref())?;

    Ok(())
}
