use std::ptr;

/// An area of use, in degrees, that restricts the candidate operations when
/// creating a transformation with [`Context::crs_to_crs`](crate::Context::crs_to_crs).
///
/// Longitudes may cross the antimeridian: `west > east` is allowed.
#[derive(Debug)]
pub struct Area {
    area: *mut proj_compat_sys::PJ_AREA,
    bbox: [f64; 4],
}

impl Area {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        let area = unsafe { proj_compat_sys::proj_area_create() };
        let mut area = Area {
            area,
            bbox: [f64::NAN; 4],
        };
        area.set_bbox(west, south, east, north);
        area
    }

    pub fn set_bbox(&mut self, west: f64, south: f64, east: f64, north: f64) {
        self.bbox = [west, south, east, north];
        if !self.area.is_null() {
            unsafe { proj_compat_sys::proj_area_set_bbox(self.area, west, south, east, north) };
        }
    }

    /// `(west, south, east, north)`
    pub fn bbox(&self) -> (f64, f64, f64, f64) {
        let [west, south, east, north] = self.bbox;
        (west, south, east, north)
    }

    /// Null if PROJ failed to allocate the area, which PROJ treats as "no area".
    pub(crate) fn as_ptr(&self) -> *mut proj_compat_sys::PJ_AREA {
        self.area
    }
}

impl Drop for Area {
    fn drop(&mut self) {
        if !self.area.is_null() {
            unsafe { proj_compat_sys::proj_area_destroy(self.area) };
            self.area = ptr::null_mut();
        }
    }
}
