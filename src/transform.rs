use crate::{Proj, ProjError};

/// Transform a geometry using PROJ.
pub trait Transform<T> {
    type Output;

    /// Transform a Geometry by mutating it in place.
    ///
    /// # Examples
    ///
    /// Transform a geometry using a PROJ string definition:
    ///
    /// ```
    /// use proj_compat::{Proj, Transform};
    /// # use approx::assert_relative_eq;
    ///
    /// let mut point = geo_types::point!(x: -36.508f32, y: -54.2815f32);
    /// let proj = Proj::new("+proj=axisswap +order=2,1,3,4").expect("invalid proj string");
    /// point.transform(&proj).unwrap();
    ///
    /// assert_relative_eq!(
    ///     point,
    ///     geo_types::point!(x: -54.2815f32, y: -36.508f32)
    /// );
    /// ```
    fn transform(&mut self, proj: &Proj) -> Result<(), ProjError>;

    /// Immutable flavor of [`Transform::transform`], which allocates a new geometry.
    ///
    /// # Examples
    ///
    /// ```
    /// use proj_compat::{Proj, Transform};
    /// # use approx::assert_relative_eq;
    ///
    /// let line = geo_types::line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)];
    /// let proj = Proj::new("+proj=axisswap +order=2,1").unwrap();
    ///
    /// assert_relative_eq!(
    ///     line.transformed(&proj).unwrap(),
    ///     geo_types::line_string![(x: 2.0, y: 1.0), (x: 4.0, y: 3.0)]
    /// );
    ///
    /// // original `line` is untouched
    /// assert_relative_eq!(line, geo_types::line_string![(x: 1.0, y: 2.0), (x: 3.0, y: 4.0)]);
    /// ```
    fn transformed(&self, proj: &Proj) -> Result<Self::Output, ProjError>;

    /// Transform a geometry from one CRS to another CRS by modifying it in place.
    ///
    /// # Examples
    ///
    /// ```
    /// # use approx::assert_relative_eq;
    /// use proj_compat::Transform;
    /// use geo_types::{point, Point};
    ///
    /// let mut point: Point<f64> = point!(x: 47.374444, y: 8.541111);
    /// point.transform_crs_to_crs("EPSG:4326", "EPSG:3857").unwrap();
    ///
    /// assert_relative_eq!(point, point!(x: 950792.127329, y: 6003408.475803), epsilon = 1e-3);
    /// ```
    fn transform_crs_to_crs(&mut self, source_crs: &str, target_crs: &str) -> Result<(), ProjError> {
        let proj = Proj::new_known_crs(source_crs, target_crs, None)?;
        self.transform(&proj)
    }

    /// Immutable flavor of [`Transform::transform_crs_to_crs`], which allocates a new geometry.
    fn transformed_crs_to_crs(
        &self,
        source_crs: &str,
        target_crs: &str,
    ) -> Result<Self::Output, ProjError> {
        let proj = Proj::new_known_crs(source_crs, target_crs, None)?;
        self.transformed(&proj)
    }
}
