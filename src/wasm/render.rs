use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlBuffer, WebGlFramebuffer,
    WebGlProgram, WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::animator::Scene;
use crate::filter::{Compositor, Filter, FilterKind, Uniform, UniformValue};
use crate::layout::{self, Rect};
use crate::pointer::Viewport;
use crate::shaders;

const A_POSITION: u32 = 0;
const A_UV: u32 = 1;

/// Texture coordinates as `[u_left, v_top, u_right, v_bottom]`.
type UvBox = [f32; 4];

/// Canvas uploads keep row 0 at the top.
const UV_SPRITE: UvBox = [0.0, 0.0, 1.0, 1.0];
/// Framebuffer textures have row 0 at the bottom.
const UV_TARGET: UvBox = [0.0, 1.0, 1.0, 0.0];

struct Program {
    program: WebGlProgram,
}

impl Program {
    fn new(gl: &GL, frag_src: &str) -> Result<Self, JsValue> {
        let vert = compile_shader(gl, GL::VERTEX_SHADER, shaders::QUAD_VERT)?;
        let frag = compile_shader(gl, GL::FRAGMENT_SHADER, frag_src)?;
        let program = gl.create_program().ok_or("unable to create program")?;
        gl.attach_shader(&program, &vert);
        gl.attach_shader(&program, &frag);
        gl.bind_attrib_location(&program, A_POSITION, "a_position");
        gl.bind_attrib_location(&program, A_UV, "a_uv");
        gl.link_program(&program);

        let linked = gl
            .get_program_parameter(&program, GL::LINK_STATUS)
            .as_bool()
            .unwrap_or(false);
        if !linked {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            return Err(format!("program link failed: {log}").into());
        }
        Ok(Self { program })
    }

    fn loc(&self, gl: &GL, name: &str) -> Option<WebGlUniformLocation> {
        gl.get_uniform_location(&self.program, name)
    }
}

fn compile_shader(gl: &GL, kind: u32, src: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl.create_shader(kind).ok_or("unable to create shader")?;
    gl.shader_source(&shader, src);
    gl.compile_shader(&shader);
    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        Err(format!("shader compile failed: {log}").into())
    }
}

/// Offscreen colour target the menu container is drawn into before the
/// stage filter runs.
struct RenderTarget {
    fbo: WebGlFramebuffer,
    texture: WebGlTexture,
}

impl RenderTarget {
    fn new(gl: &GL, width: i32, height: i32) -> Result<Self, JsValue> {
        let texture = gl.create_texture().ok_or("unable to create texture")?;
        let fbo = gl.create_framebuffer().ok_or("unable to create framebuffer")?;
        let target = Self { fbo, texture };
        target.resize(gl, width, height)?;

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&target.fbo));
        gl.framebuffer_texture_2d(
            GL::FRAMEBUFFER,
            GL::COLOR_ATTACHMENT0,
            GL::TEXTURE_2D,
            Some(&target.texture),
            0,
        );
        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        Ok(target)
    }

    fn resize(&self, gl: &GL, width: i32, height: i32) -> Result<(), JsValue> {
        gl.bind_texture(GL::TEXTURE_2D, Some(&self.texture));
        gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
            GL::TEXTURE_2D,
            0,
            GL::RGBA as i32,
            width.max(1),
            height.max(1),
            0,
            GL::RGBA,
            GL::UNSIGNED_BYTE,
            None,
        )?;
        set_texture_params(gl);
        Ok(())
    }
}

fn set_texture_params(gl: &GL) {
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MAG_FILTER, GL::LINEAR as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
}

/// WebGL2 compositor for the menu: text sprites into an offscreen container,
/// then the container through the stage filter onto the canvas.
pub struct Renderer {
    gl: GL,
    canvas: HtmlCanvasElement,
    resolution: f64,
    viewport: Viewport,
    vao: WebGlVertexArrayObject,
    vbo: WebGlBuffer,
    sprite: Program,
    fill: Program,
    hover: Program,
    screen: Program,
    sprites: Vec<WebGlTexture>,
    target: RenderTarget,
}

impl Renderer {
    pub fn new(
        document: &Document,
        viewport: Viewport,
        resolution: f64,
        text_canvases: &[HtmlCanvasElement],
    ) -> Result<Self, JsValue> {
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let vao = gl.create_vertex_array().ok_or("unable to create vertex array")?;
        let vbo = gl.create_buffer().ok_or("unable to create buffer")?;
        gl.bind_vertex_array(Some(&vao));
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vbo));
        gl.enable_vertex_attrib_array(A_POSITION);
        gl.vertex_attrib_pointer_with_i32(A_POSITION, 2, GL::FLOAT, false, 16, 0);
        gl.enable_vertex_attrib_array(A_UV);
        gl.vertex_attrib_pointer_with_i32(A_UV, 2, GL::FLOAT, false, 16, 8);

        gl.pixel_storei(GL::UNPACK_PREMULTIPLY_ALPHA_WEBGL, 1);
        let sprites = text_canvases
            .iter()
            .map(|c| upload_canvas(&gl, c))
            .collect::<Result<Vec<_>, _>>()?;

        gl.enable(GL::BLEND);
        gl.blend_func(GL::ONE, GL::ONE_MINUS_SRC_ALPHA);

        let (w, h) = device_size(viewport, resolution);
        let target = RenderTarget::new(&gl, w, h)?;

        let renderer = Self {
            sprite: Program::new(&gl, shaders::SPRITE_FRAG)?,
            fill: Program::new(&gl, shaders::FILL_FRAG)?,
            hover: Program::new(&gl, shaders::HOVER_FRAG)?,
            screen: Program::new(&gl, shaders::SCREEN_FRAG)?,
            gl,
            canvas,
            resolution,
            viewport,
            vao,
            vbo,
            sprites,
            target,
        };
        renderer.size_canvas()?;
        Ok(renderer)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn resize(&mut self, viewport: Viewport) -> Result<(), JsValue> {
        self.viewport = viewport;
        let (w, h) = device_size(viewport, self.resolution);
        self.target.resize(&self.gl, w, h)?;
        self.size_canvas()
    }

    fn size_canvas(&self) -> Result<(), JsValue> {
        let (w, h) = device_size(self.viewport, self.resolution);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{}px", self.viewport.width))?;
        style.set_property("height", &format!("{}px", self.viewport.height))?;
        Ok(())
    }

    pub fn render(&self, mut scene: Scene<'_>) {
        let gl = &self.gl;
        let (w, h) = device_size(self.viewport, self.resolution);
        gl.bind_vertex_array(Some(&self.vao));

        gl.bind_framebuffer(GL::FRAMEBUFFER, Some(&self.target.fbo));
        gl.viewport(0, 0, w, h);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.clear(GL::COLOR_BUFFER_BIT);
        self.draw_background(&scene);

        gl.enable(GL::SCISSOR_TEST);
        self.scissor(scene.mask);
        for (item, texture) in scene.items.iter_mut().zip(&self.sprites) {
            let rect = layout::item_rect(item, scene.container_x, scene.viewport);
            if item.hovered {
                item.hover.apply(&mut Pass {
                    renderer: self,
                    texture,
                    rect,
                    uv: UV_SPRITE,
                });
            } else {
                self.draw(&self.sprite, texture, rect, UV_SPRITE, &[]);
            }
        }
        gl.disable(GL::SCISSOR_TEST);

        gl.bind_framebuffer(GL::FRAMEBUFFER, None);
        gl.viewport(0, 0, w, h);
        gl.clear(GL::COLOR_BUFFER_BIT);
        let full = Rect {
            x: 0.0,
            y: 0.0,
            width: self.viewport.width,
            height: self.viewport.height,
        };
        scene.screen.apply(&mut Pass {
            renderer: self,
            texture: &self.target.texture,
            rect: full,
            uv: UV_TARGET,
        });
    }

    fn draw_background(&self, scene: &Scene<'_>) {
        if scene.background_alpha <= 0.0 {
            return;
        }
        let [r, g, b] = scene.background.rgb_f32();
        let gl = &self.gl;
        gl.use_program(Some(&self.fill.program));
        gl.uniform4f(self.fill.loc(gl, "u_colour").as_ref(), r, g, b, scene.background_alpha);
        gl.uniform2f(
            self.fill.loc(gl, "u_viewport").as_ref(),
            self.viewport.width as f32,
            self.viewport.height as f32,
        );
        let full = Rect {
            x: 0.0,
            y: 0.0,
            width: self.viewport.width,
            height: self.viewport.height,
        };
        self.upload_quad(full, UV_SPRITE);
        gl.draw_arrays(GL::TRIANGLES, 0, 6);
    }

    /// Clip rectangle in CSS pixels, y down.
    fn scissor(&self, r: Rect) {
        let res = self.resolution;
        let x0 = r.x.max(0.0);
        let y0 = r.y.max(0.0);
        let x1 = (r.x + r.width).min(self.viewport.width);
        let y1 = (r.y + r.height).min(self.viewport.height);
        let w = ((x1 - x0).max(0.0) * res) as i32;
        let h = ((y1 - y0).max(0.0) * res) as i32;
        let bottom = ((self.viewport.height - y1).max(0.0) * res) as i32;
        self.gl.scissor((x0 * res) as i32, bottom, w, h);
    }

    fn program(&self, kind: FilterKind) -> &Program {
        match kind {
            FilterKind::Hover => &self.hover,
            FilterKind::Screen => &self.screen,
        }
    }

    fn draw(&self, program: &Program, texture: &WebGlTexture, rect: Rect, uv: UvBox, uniforms: &[Uniform]) {
        let gl = &self.gl;
        gl.use_program(Some(&program.program));
        gl.active_texture(GL::TEXTURE0);
        gl.bind_texture(GL::TEXTURE_2D, Some(texture));
        gl.uniform1i(program.loc(gl, "u_sampler").as_ref(), 0);
        gl.uniform2f(
            program.loc(gl, "u_viewport").as_ref(),
            self.viewport.width as f32,
            self.viewport.height as f32,
        );
        gl.uniform2f(
            program.loc(gl, "u_input_size").as_ref(),
            (rect.width * self.resolution) as f32,
            (rect.height * self.resolution) as f32,
        );
        for u in uniforms {
            let loc = program.loc(gl, u.name);
            match u.value {
                UniformValue::Float(v) => gl.uniform1f(loc.as_ref(), v),
                UniformValue::Vec2([x, y]) => gl.uniform2f(loc.as_ref(), x, y),
            }
        }
        self.upload_quad(rect, uv);
        gl.draw_arrays(GL::TRIANGLES, 0, 6);
    }

    fn upload_quad(&self, r: Rect, [u0, v0, u1, v1]: UvBox) {
        let (x0, y0) = (r.x as f32, r.y as f32);
        let (x1, y1) = ((r.x + r.width) as f32, (r.y + r.height) as f32);
        #[rustfmt::skip]
        let verts: [f32; 24] = [
            x0, y0, u0, v0,
            x1, y0, u1, v0,
            x0, y1, u0, v1,
            x0, y1, u0, v1,
            x1, y0, u1, v0,
            x1, y1, u1, v1,
        ];
        let gl = &self.gl;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&self.vbo));
        gl.buffer_data_with_array_buffer_view(
            GL::ARRAY_BUFFER,
            &js_sys::Float32Array::from(&verts[..]),
            GL::DYNAMIC_DRAW,
        );
    }
}

/// One filtered draw of a texture into a rectangle.
struct Pass<'a> {
    renderer: &'a Renderer,
    texture: &'a WebGlTexture,
    rect: Rect,
    uv: UvBox,
}

impl Compositor for Pass<'_> {
    fn composite(&mut self, kind: FilterKind, uniforms: &[Uniform]) {
        let r = self.renderer;
        r.draw(r.program(kind), self.texture, self.rect, self.uv, uniforms);
    }
}

fn upload_canvas(gl: &GL, canvas: &HtmlCanvasElement) -> Result<WebGlTexture, JsValue> {
    let texture = gl.create_texture().ok_or("unable to create texture")?;
    gl.bind_texture(GL::TEXTURE_2D, Some(&texture));
    gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
        GL::TEXTURE_2D,
        0,
        GL::RGBA as i32,
        GL::RGBA,
        GL::UNSIGNED_BYTE,
        canvas,
    )?;
    set_texture_params(gl);
    Ok(texture)
}

fn device_size(viewport: Viewport, resolution: f64) -> (i32, i32) {
    (
        (viewport.width * resolution).round() as i32,
        (viewport.height * resolution).round() as i32,
    )
}
