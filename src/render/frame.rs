use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    CanvasLayerKind, CirclePrimitive, Fill, GradientPrimitive, PolygonPrimitive, RectPrimitive,
    TextPrimitive,
};

/// One draw call; commands inside a layer paint in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon(PolygonPrimitive),
    Circle(CirclePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

impl DrawCommand {
    pub fn validate(&self) -> ChartResult<()> {
        match self {
            Self::Polygon(polygon) => polygon.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Rect(rect) => rect.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: CanvasLayerKind,
    pub commands: Vec<DrawCommand>,
}

/// Backend-agnostic scene for one chart draw pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub gradients: Vec<GradientPrimitive>,
    pub layers: Vec<LayerPrimitives>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            gradients: Vec::new(),
            layers: CanvasLayerKind::CANONICAL_ORDER
                .into_iter()
                .map(|kind| LayerPrimitives {
                    kind,
                    commands: Vec::new(),
                })
                .collect(),
        }
    }

    pub fn push(&mut self, kind: CanvasLayerKind, command: DrawCommand) {
        if let Some(layer) = self.layers.iter_mut().find(|layer| layer.kind == kind) {
            layer.commands.push(command);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: CanvasLayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCommand> {
        self.layers.iter().flat_map(|layer| layer.commands.iter())
    }

    #[must_use]
    pub fn gradient(&self, key: &crate::core::GradientKey) -> Option<&GradientPrimitive> {
        self.gradients.iter().find(|gradient| &gradient.key == key)
    }

    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.commands()
            .filter(|command| matches!(command, DrawCommand::Polygon(_)))
            .count()
    }

    #[must_use]
    pub fn circle_count(&self) -> usize {
        self.commands()
            .filter(|command| matches!(command, DrawCommand::Circle(_)))
            .count()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.commands()
            .filter(|command| matches!(command, DrawCommand::Text(_)))
            .count()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }

        for gradient in &self.gradients {
            gradient.validate()?;
        }
        for command in self.commands() {
            command.validate()?;
            if let DrawCommand::Polygon(PolygonPrimitive {
                fill: Fill::Gradient(key),
                ..
            }) = command
            {
                if self.gradient(key).is_none() {
                    return Err(ChartError::InvalidData(format!(
                        "polygon references undefined gradient `{key}`"
                    )));
                }
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|layer| layer.commands.is_empty())
    }
}
