use std::io::Write;

use crate::error::{ExportError, Result};
use crate::tessellation::Polyline;

/// Writes polylines as Wavefront OBJ line objects.
///
/// Each polyline becomes an `o` object with its vertices on the `z = 0`
/// plane and a single `l` element. Vertex indices are 1-based and keep
/// counting across objects written to the same destination.
pub struct ObjWriter<W: Write> {
    writer: W,
    vertex_count: usize,
}

impl<W: Write> ObjWriter<W> {
    /// Wraps the destination.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            vertex_count: 0,
        }
    }

    /// Appends `polyline` as object `name`. Polylines with fewer than two
    /// points are written without a line element.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if writing fails.
    pub fn write_polyline(&mut self, name: &str, polyline: &Polyline) -> Result<()> {
        self.write_object(name, polyline).map_err(ExportError::from)?;
        Ok(())
    }

    fn write_object(&mut self, name: &str, polyline: &Polyline) -> std::io::Result<()> {
        writeln!(self.writer, "o {name}")?;
        for p in &polyline.points {
            writeln!(self.writer, "v {:.9} {:.9} 0", p.x, p.y)?;
        }

        let first = self.vertex_count + 1;
        self.vertex_count += polyline.points.len();
        if polyline.points.len() >= 2 {
            write!(self.writer, "l")?;
            for index in first..=self.vertex_count {
                write!(self.writer, " {index}")?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    /// Flushes and returns the destination.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Io`] if flushing fails.
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush().map_err(ExportError::from)?;
        Ok(self.writer)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;

    fn polyline(points: &[(f64, f64)]) -> Polyline {
        Polyline {
            points: points.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
        }
    }

    #[test]
    fn indices_continue_across_objects() {
        let mut obj = ObjWriter::new(Vec::new());
        obj.write_polyline("first", &polyline(&[(0.0, 0.0), (1.0, 0.0)]))
            .unwrap();
        obj.write_polyline("second", &polyline(&[(1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]))
            .unwrap();
        let text = String::from_utf8(obj.into_inner().unwrap()).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "o first");
        assert_eq!(lines[1], "v 0.000000000 0.000000000 0");
        assert_eq!(lines[3], "l 1 2");
        assert_eq!(lines[4], "o second");
        assert_eq!(lines.last().copied(), Some("l 3 4 5"));
    }

    #[test]
    fn single_point_has_no_line_element() {
        let mut obj = ObjWriter::new(Vec::new());
        obj.write_polyline("dot", &polyline(&[(2.0, 3.0)])).unwrap();
        let text = String::from_utf8(obj.into_inner().unwrap()).unwrap();
        assert!(!text.contains("\nl"));
    }
}
