use crate::coord::{Bounds, Coord, Direction, Geod};
use crate::errno::Errno;
use crate::pj::Pj;
use crate::{Area, Context, ProjError, Version, compiled_version};
use std::mem;

/// Information about a PROJ object.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjInfo {
    pub id: String,
    pub description: String,
    pub definition: String,
    pub has_inverse: bool,
    /// Expected accuracy in metres, or `-1` if unknown.
    pub accuracy: f64,
}

/// A PROJ object: a CRS, a projection or a coordinate operation.
pub struct Proj {
    pj: Pj,
}

impl Proj {
    pub(crate) fn from_pj(pj: Pj) -> Self {
        Proj { pj }
    }

    pub(crate) fn as_ptr(&self) -> *mut proj_compat_sys::PJ {
        self.pj.as_ptr()
    }

    /// Create an object from a definition, using a private [`Context`].
    ///
    /// ```
    /// use proj_compat::{Coord, Proj};
    ///
    /// let swap = Proj::new("+proj=axisswap +order=2,1").unwrap();
    /// let swapped = swap.forward(Coord::xy(1.0, 2.0)).unwrap();
    /// assert_eq!((swapped.x(), swapped.y()), (2.0, 1.0));
    /// ```
    pub fn new(definition: &str) -> Result<Proj, ProjError> {
        Context::new().proj(definition)
    }

    /// Create a transformation between two known CRS, using a private [`Context`].
    pub fn new_known_crs(from: &str, to: &str, area: Option<&Area>) -> Result<Proj, ProjError> {
        Context::new().crs_to_crs(from, to, area)
    }

    /// The context this object was created in.
    pub fn context(&self) -> &Context {
        self.pj.context()
    }

    fn check(&self, errno: Errno) -> Result<(), ProjError> {
        if errno.is_err() {
            Err(self.pj.error(errno))
        } else {
            Ok(())
        }
    }

    pub fn trans(&self, direction: Direction, coord: Coord) -> Result<Coord, ProjError> {
        let (out, errno) = self.pj.with_errno(|p| unsafe {
            proj_compat_sys::proj_trans(p, direction.as_raw(), coord.into())
        });
        self.check(errno)?;
        Ok(out.into())
    }

    pub fn forward(&self, coord: Coord) -> Result<Coord, ProjError> {
        self.trans(Direction::Forward, coord)
    }

    pub fn inverse(&self, coord: Coord) -> Result<Coord, ProjError> {
        self.trans(Direction::Inverse, coord)
    }

    /// Transform `coords` in place.
    pub fn trans_array(&self, direction: Direction, coords: &mut [Coord]) -> Result<(), ProjError> {
        if coords.is_empty() {
            return Ok(());
        }
        let (rv, _) = self.pj.with_errno(|p| unsafe {
            proj_compat_sys::proj_trans_array(
                p,
                direction.as_raw(),
                coords.len(),
                coords.as_mut_ptr().cast::<proj_compat_sys::PJ_COORD>(),
            )
        });
        self.check(Errno(rv))
    }

    pub fn forward_array(&self, coords: &mut [Coord]) -> Result<(), ProjError> {
        self.trans_array(Direction::Forward, coords)
    }

    pub fn inverse_array(&self, coords: &mut [Coord]) -> Result<(), ProjError> {
        self.trans_array(Direction::Inverse, coords)
    }

    /// Transform interleaved coordinates in place.
    ///
    /// Each point takes `stride` values: `x` at offset 0, `y` at offset 1, and
    /// optionally `z` and a time/measure value at `z_index` and `m_index`.
    /// Other offsets are left alone.
    ///
    /// ```
    /// use proj_compat::Proj;
    ///
    /// let swap = Proj::new("+proj=axisswap +order=2,1").unwrap();
    /// let mut xyz = [1.0, 2.0, 10.0, 3.0, 4.0, 20.0];
    /// swap.forward_flat_coords(&mut xyz, 3, Some(2), None).unwrap();
    /// assert_eq!(xyz, [2.0, 1.0, 10.0, 4.0, 3.0, 20.0]);
    /// ```
    pub fn trans_flat_coords(
        &self,
        direction: Direction,
        flat_coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        if flat_coords.is_empty() {
            return Ok(());
        }
        if stride < 2 {
            return Err(ProjError::InvalidArgument(format!(
                "stride {stride} leaves no room for x and y"
            )));
        }
        if flat_coords.len() % stride != 0 {
            return Err(ProjError::InvalidArgument(format!(
                "{} values do not divide into points of {stride}",
                flat_coords.len()
            )));
        }
        for index in [z_index, m_index].into_iter().flatten() {
            if !(2..stride).contains(&index) {
                return Err(ProjError::InvalidArgument(format!(
                    "offset {index} is outside 2..{stride}"
                )));
            }
        }
        if z_index.is_some() && z_index == m_index {
            return Err(ProjError::InvalidArgument(
                "z and m cannot share an offset".to_string(),
            ));
        }

        let n = flat_coords.len() / stride;
        let step = stride * mem::size_of::<f64>();
        let base = flat_coords.as_mut_ptr();
        // (pointer, byte stride, count) per axis; absent axes are null/0/0.
        let axis = |index: Option<usize>| match index {
            Some(i) => (unsafe { base.add(i) }, step, n),
            None => (std::ptr::null_mut(), 0, 0),
        };
        let (x, sx, nx) = axis(Some(0));
        let (y, sy, ny) = axis(Some(1));
        let (z, sz, nz) = axis(z_index);
        let (m, sm, nm) = axis(m_index);

        let (transformed, errno) = self.pj.with_errno(|p| unsafe {
            proj_compat_sys::proj_trans_generic(
                p,
                direction.as_raw(),
                x,
                sx,
                nx,
                y,
                sy,
                ny,
                z,
                sz,
                nz,
                m,
                sm,
                nm,
            )
        });
        self.check(errno)?;
        if transformed != n {
            return Err(ProjError::Projection {
                code: 0,
                message: format!("transformed {transformed} of {n} points"),
            });
        }
        Ok(())
    }

    pub fn forward_flat_coords(
        &self,
        flat_coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        self.trans_flat_coords(Direction::Forward, flat_coords, stride, z_index, m_index)
    }

    pub fn inverse_flat_coords(
        &self,
        flat_coords: &mut [f64],
        stride: usize,
        z_index: Option<usize>,
        m_index: Option<usize>,
    ) -> Result<(), ProjError> {
        self.trans_flat_coords(Direction::Inverse, flat_coords, stride, z_index, m_index)
    }

    /// Transform the (up to four) values of `values` in place.
    pub fn trans_slice(&self, direction: Direction, values: &mut [f64]) -> Result<(), ProjError> {
        if values.is_empty() {
            return Ok(());
        }
        let coord = self.trans(direction, Coord::from_slice(values))?;
        coord.write_to_slice(values);
        Ok(())
    }

    pub fn forward_slice(&self, values: &mut [f64]) -> Result<(), ProjError> {
        self.trans_slice(Direction::Forward, values)
    }

    pub fn inverse_slice(&self, values: &mut [f64]) -> Result<(), ProjError> {
        self.trans_slice(Direction::Inverse, values)
    }

    /// Transform a list of coordinate slices in place. Slices may differ in
    /// length; each keeps its length.
    pub fn trans_slices<S: AsMut<[f64]>>(
        &self,
        direction: Direction,
        slices: &mut [S],
    ) -> Result<(), ProjError> {
        let mut coords: Vec<Coord> = slices
            .iter_mut()
            .map(|s| Coord::from_slice(s.as_mut()))
            .collect();
        self.trans_array(direction, &mut coords)?;
        for (slice, coord) in slices.iter_mut().zip(&coords) {
            coord.write_to_slice(slice.as_mut());
        }
        Ok(())
    }

    pub fn forward_slices<S: AsMut<[f64]>>(&self, slices: &mut [S]) -> Result<(), ProjError> {
        self.trans_slices(Direction::Forward, slices)
    }

    pub fn inverse_slices<S: AsMut<[f64]>>(&self, slices: &mut [S]) -> Result<(), ProjError> {
        self.trans_slices(Direction::Inverse, slices)
    }

    /// Transform a bounding box, densifying each edge with `densify_points`
    /// extra points (21 is PROJ's recommendation).
    ///
    /// `densify_points` must be within `0..=10000`.
    ///
    /// Needs PROJ 8.2; on older versions this is [`ProjError::Unsupported`].
    pub fn trans_bounds(
        &self,
        direction: Direction,
        bounds: Bounds,
        densify_points: i32,
    ) -> Result<Bounds, ProjError> {
        if cfg!(proj_before_8_2) {
            log::debug!("proj_trans_bounds is a stand-in on PROJ {}", compiled_version());
            return Err(ProjError::Unsupported {
                operation: proj_compat_sys::TRANS_BOUNDS.function,
                required: Version::of_gate(&proj_compat_sys::TRANS_BOUNDS),
                compiled: compiled_version(),
            });
        }
        if !(0..=10_000).contains(&densify_points) {
            return Err(ProjError::InvalidArgument(format!(
                "proj_trans_bounds takes 0 to 10000 densify points, not {densify_points}"
            )));
        }
        let mut out = Bounds::default();
        let ctx = self.context().as_ptr();
        let (rv, errno) = self.pj.with_errno(|p| unsafe {
            proj_compat_sys::proj_trans_bounds(
                ctx,
                p,
                direction.as_raw(),
                bounds.xmin,
                bounds.ymin,
                bounds.xmax,
                bounds.ymax,
                &mut out.xmin,
                &mut out.ymin,
                &mut out.xmax,
                &mut out.ymax,
                densify_points,
            )
        });
        if rv == 0 {
            // Argument checks inside PROJ fail without setting an errno.
            if !errno.is_err() {
                return Err(ProjError::InvalidArgument(format!(
                    "proj_trans_bounds rejected {bounds:?} with {densify_points} densify points"
                )));
            }
            return Err(self.pj.error(errno));
        }
        Ok(out)
    }

    pub fn forward_bounds(&self, bounds: Bounds, densify_points: i32) -> Result<Bounds, ProjError> {
        self.trans_bounds(Direction::Forward, bounds, densify_points)
    }

    pub fn inverse_bounds(&self, bounds: Bounds, densify_points: i32) -> Result<Bounds, ProjError> {
        self.trans_bounds(Direction::Inverse, bounds, densify_points)
    }

    /// The operation used by the most recent transformation, when this object
    /// chooses between several. Always `None` before PROJ 9.1.
    pub fn last_used_operation(&self) -> Option<Proj> {
        let pj_ptr = unsafe { proj_compat_sys::proj_trans_get_last_used_operation(self.as_ptr()) };
        Pj::from_pj_ptr_opt(self.context().clone(), pj_ptr).map(Proj::from_pj)
    }

    /// A copy whose input and output axis order is longitude/easting first.
    pub fn normalize_for_visualization(&self) -> Result<Proj, ProjError> {
        let ctx = self.context().clone();
        let pj_ptr =
            unsafe { proj_compat_sys::proj_normalize_for_visualization(ctx.as_ptr(), self.as_ptr()) };
        Pj::from_pj_ptr(ctx, pj_ptr).map(Proj::from_pj)
    }

    /// Geodesic between `a` and `b`, given in radians.
    pub fn geod(&self, a: Coord, b: Coord) -> Geod {
        let out = unsafe { proj_compat_sys::proj_geod(self.as_ptr(), a.into(), b.into()) };
        let geod = unsafe { out.geod };
        Geod {
            distance: geod.s,
            forward_azimuth: geod.a1,
            reverse_azimuth: geod.a2,
        }
    }

    /// Geodesic distance in metres between `a` and `b`, given in radians.
    pub fn lp_dist(&self, a: Coord, b: Coord) -> f64 {
        unsafe { proj_compat_sys::proj_lp_dist(self.as_ptr(), a.into(), b.into()) }
    }

    /// Like [`lp_dist`](Self::lp_dist), also accounting for height.
    pub fn lpz_dist(&self, a: Coord, b: Coord) -> f64 {
        unsafe { proj_compat_sys::proj_lpz_dist(self.as_ptr(), a.into(), b.into()) }
    }

    pub fn info(&self) -> Result<ProjInfo, ProjError> {
        let info = unsafe { proj_compat_sys::proj_pj_info(self.as_ptr()) };
        unsafe {
            Ok(ProjInfo {
                id: crate::_string_or_empty(info.id)?,
                description: crate::_string_or_empty(info.description)?,
                definition: crate::_string_or_empty(info.definition)?,
                has_inverse: info.has_inverse != 0,
                accuracy: info.accuracy,
            })
        }
    }

    /// The definition PROJ holds for this object.
    pub fn def(&self) -> Result<String, ProjError> {
        Ok(self.info()?.definition)
    }

    pub fn is_crs(&self) -> bool {
        unsafe { proj_compat_sys::proj_is_crs(self.as_ptr()) != 0 }
    }
}

impl std::fmt::Debug for Proj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.info() {
            Ok(info) => f
                .debug_struct("Proj")
                .field("id", &info.id)
                .field("description", &info.description)
                .field("definition", &info.definition)
                .finish(),
            Err(_) => f.debug_struct("Proj").finish_non_exhaustive(),
        }
    }
}
