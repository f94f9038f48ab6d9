use ratatui::{
    layout::Rect,
    style::Color,
    symbols,
    text::{Line, Span},
    widgets::canvas::{Canvas, Points},
    widgets::{Block, Borders},
    Frame,
};

use super::state::UiState;

const DEFAULT_COLOR: Color = Color::Red;

/// Map an RGBA color to one of a few terminal shades by thresholding green and blue.
fn color_bucket(c: &[f32; 4]) -> usize {
    usize::from(c[1] >= 0.5) * 2 + usize::from(c[2] >= 0.5)
}

fn bucket_color(bucket: usize) -> Color {
    let level = |hi: bool| if hi { 170 } else { 40 };
    Color::Rgb(255, level(bucket & 2 != 0), level(bucket & 1 != 0))
}

/// Group projected points by display color. Uncolored sets draw in a single color.
pub fn color_groups(points: &[(f64, f64)], colors: &[[f32; 4]]) -> Vec<(Color, Vec<(f64, f64)>)> {
    if colors.len() != points.len() {
        return vec![(DEFAULT_COLOR, points.to_vec())];
    }
    let mut buckets: [Vec<(f64, f64)>; 4] = Default::default();
    for (p, c) in points.iter().zip(colors) {
        buckets[color_bucket(c)].push(*p);
    }
    buckets
        .into_iter()
        .enumerate()
        .filter(|(_, pts)| !pts.is_empty())
        .map(|(i, pts)| (bucket_color(i), pts))
        .collect()
}

/// Render the particle cloud as a braille scatter plot.
pub fn draw_scatter(area: Rect, f: &mut Frame, state: &UiState) {
    let points = state.projected();
    let groups = color_groups(&points, &state.colors);
    let e = state.extent;

    let mut title = vec![Span::raw(format!(
        " {}D · {} particles · frame {} ",
        state.dims,
        points.len(),
        state.frame
    ))];
    if state.dims == 3 {
        title.push(Span::raw(format!(
            "· az {:.0}° el {:.0}° ",
            state.azimuth.to_degrees(),
            state.elevation.to_degrees()
        )));
    }

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Line::from(title)),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([-e, e])
        .y_bounds([-e, e])
        .paint(|ctx| {
            for (color, coords) in &groups {
                ctx.draw(&Points {
                    coords: coords.as_slice(),
                    color: *color,
                });
            }
        });
    f.render_widget(canvas, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uncolored_points_form_one_group() {
        let pts = vec![(0.0, 0.0), (1.0, 1.0)];
        let groups = color_groups(&pts, &[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, DEFAULT_COLOR);
        assert_eq!(groups[0].1, pts);
    }

    #[test]
    fn colors_split_into_buckets() {
        let pts = vec![(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)];
        let colors = [
            [1.0, 0.1, 0.1, 1.0],
            [1.0, 0.9, 0.9, 1.0],
            [1.0, 0.2, 0.3, 1.0],
        ];
        let groups = color_groups(&pts, &colors);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0], (Color::Rgb(255, 40, 40), vec![(0.0, 0.0), (2.0, 0.0)]));
        assert_eq!(groups[1], (Color::Rgb(255, 170, 170), vec![(1.0, 0.0)]));
    }
}
