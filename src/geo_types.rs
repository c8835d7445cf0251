use crate::{Coord, Proj, ProjError, Transform};
use geo_types::CoordFloat;
use num_traits::{NumCast, ToPrimitive};

/// Narrow a transformed coordinate back to the geometry's number type.
///
/// A finite value that overflows `T` is an error rather than an infinity.
fn from_coord<T: CoordFloat>(c: Coord) -> Result<geo_types::Coord<T>, ProjError> {
    let narrow = |v: f64| -> Option<T> {
        let narrowed = <T as NumCast>::from(v)?;
        (narrowed.is_finite() || !v.is_finite()).then_some(narrowed)
    };
    match (narrow(c.x()), narrow(c.y())) {
        (Some(x), Some(y)) => Ok(geo_types::Coord { x, y }),
        _ => Err(ProjError::InvalidArgument(format!(
            "transformed coordinate ({}, {}) does not fit the geometry's number type",
            c.x(),
            c.y()
        ))),
    }
}

/// Forward-transform a run of coordinates with one `proj_trans_array` call.
fn transform_coords<T: CoordFloat>(
    proj: &Proj,
    coords: impl IntoIterator<Item = geo_types::Coord<T>>,
) -> Result<Vec<geo_types::Coord<T>>, ProjError> {
    let mut raw = coords
        .into_iter()
        .map(Coord::from)
        .collect::<Vec<_>>();
    proj.forward_array(&mut raw)?;
    raw.into_iter().map(from_coord).collect()
}

///```rust
/// use approx::assert_abs_diff_eq;
/// use proj_compat::Coord;
///
/// let coord: Coord = geo_types::coord! { x: 4760096.421921f64, y: 3744293.729449f64 }.into();
/// assert_abs_diff_eq!(coord.x(), 4760096.421921);
/// assert_abs_diff_eq!(coord.z(), 0.0);
/// ```
impl<T: CoordFloat> From<geo_types::Coord<T>> for Coord {
    fn from(c: geo_types::Coord<T>) -> Self {
        Coord::xy(
            c.x.to_f64().unwrap_or(f64::NAN),
            c.y.to_f64().unwrap_or(f64::NAN),
        )
    }
}

impl<T: CoordFloat> Transform<T> for geo_types::Coord<T> {
    type Output = Self;

    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError> {
        *self = self.transformed(proj)?;
        Ok(())
    }

    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError> {
        from_coord(proj.forward(Coord::from(*self))?)
    }
}

impl<T: CoordFloat> Transform<T> for geo_types::Point<T> {
    type Output = Self;

    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError> {
        self.0.transform(proj)
    }

    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError> {
        Ok(geo_types::Point(self.0.transformed(proj)?))
    }
}

impl<T: CoordFloat> Transform<T> for geo_types::LineString<T> {
    type Output = Self;

    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError> {
        *self = self.transformed(proj)?;
        Ok(())
    }

    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError> {
        Ok(geo_types::LineString(transform_coords(proj, self.0.iter().copied())?))
    }
}

impl<T: CoordFloat> Transform<T> for geo_types::MultiPoint<T> {
    type Output = Self;

    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError> {
        *self = self.transformed(proj)?;
        Ok(())
    }

    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError> {
        let coords = transform_coords(proj, self.0.iter().map(|p| p.0))?;
        Ok(geo_types::MultiPoint(
            coords.into_iter().map(geo_types::Point).collect(),
        ))
    }
}

impl<T: CoordFloat> Transform<T> for geo_types::Polygon<T> {
    type Output = Self;

    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError> {
        *self = self.transformed(proj)?;
        Ok(())
    }

    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError> {
        let exterior = self.exterior().transformed(proj)?;
        let interiors = self
            .interiors()
            .iter()
            .map(|ring| ring.transformed(proj))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(geo_types::Polygon::new(exterior, interiors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use geo_types::{coord, line_string, point, polygon, MultiPoint};

    fn axis_swap() -> Proj {
        Proj::new("+proj=axisswap +order=2,1").unwrap()
    }

    #[test]
    fn coord_and_point() {
        let proj = axis_swap();
        let mut c = coord! { x: 1.0f64, y: 2.0 };
        c.transform(&proj).unwrap();
        assert_eq!(c, coord! { x: 2.0, y: 1.0 });

        let p = point!(x: 3.0f32, y: 4.0f32);
        assert_relative_eq!(p.transformed(&proj).unwrap(), point!(x: 4.0f32, y: 3.0f32));
    }

    #[test]
    fn multi_point() {
        let proj = axis_swap();
        let mut mp = MultiPoint::from(vec![point!(x: 1.0, y: 2.0), point!(x: 3.0, y: 4.0)]);
        mp.transform(&proj).unwrap();
        assert_relative_eq!(
            mp,
            MultiPoint::from(vec![point!(x: 2.0, y: 1.0), point!(x: 4.0, y: 3.0)])
        );
    }

    #[test]
    fn polygon_with_hole() {
        let proj = axis_swap();
        let poly = polygon!(
            exterior: [(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 20.0), (x: 0.0, y: 0.0)],
            interiors: [[(x: 1.0, y: 1.0), (x: 2.0, y: 1.0), (x: 2.0, y: 3.0), (x: 1.0, y: 1.0)]],
        );
        let swapped = poly.transformed(&proj).unwrap();
        assert_relative_eq!(
            swapped,
            polygon!(
                exterior: [(x: 0.0, y: 0.0), (x: 0.0, y: 10.0), (x: 20.0, y: 10.0), (x: 0.0, y: 0.0)],
                interiors: [[(x: 1.0, y: 1.0), (x: 1.0, y: 2.0), (x: 3.0, y: 2.0), (x: 1.0, y: 1.0)]],
            )
        );
    }

    #[test]
    fn crs_to_crs_line_string() {
        let line = line_string![
            (x: 40.712778, y: -74.006111),
            (x: 48.856613, y: 2.352222),
        ];
        let projected = line.transformed_crs_to_crs("EPSG:4326", "EPSG:3857").unwrap();
        assert_relative_eq!(
            projected,
            line_string![
                (x: -8238322.592110482, y: 4970068.348185822),
                (x: 261848.15527273554, y: 6250566.54904563),
            ],
            epsilon = 1e-3
        );
    }

    #[test]
    fn overflowing_the_number_type_is_an_error() {
        let shift = Proj::new("+proj=affine +xoff=1e39").unwrap();
        let mut p = point!(x: 1.0f32, y: 2.0f32);
        let err = p.transform(&shift).unwrap_err();
        assert!(matches!(err, ProjError::InvalidArgument(_)), "{err}");
        assert_eq!(p, point!(x: 1.0f32, y: 2.0f32));

        let wide = point!(x: 1.0f64, y: 2.0f64).transformed(&shift).unwrap();
        assert_relative_eq!(wide.x(), 1e39);
    }

    #[test]
    fn infinities_from_proj_pass_through() {
        let c = from_coord::<f32>(Coord::xy(f64::INFINITY, 2.0)).unwrap();
        assert_eq!(c.x, f32::INFINITY);
        assert_eq!(c.y, 2.0);
        assert!(from_coord::<f32>(Coord::xy(f64::MAX, 0.0)).is_err());
    }

    #[test]
    fn failed_transform_leaves_geometry() {
        let mut p = point!(x: 91.0, y: 0.0);
        assert!(p.transform_crs_to_crs("EPSG:4326", "EPSG:3857").is_err());
        assert_eq!(p, point!(x: 91.0, y: 0.0));
    }
}
