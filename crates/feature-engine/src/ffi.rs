//! C ABI for the feature extractor
//!
//! Exposes the create / compute / destroy lifecycle to non-Rust callers.
//! Handles are heap-allocated [`SignalFeatureExtractor`]s; results are
//! written into a caller-owned buffer of [`FEATURE_DIMENSION`] doubles and
//! success is reported through a status code rather than a null pointer.

use libc::{c_double, c_int, size_t};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tracing::{error, warn};

use crate::{
    ExtractorConfig, FeatureError, FeatureExtractor, SignalFeatureExtractor, FEATURE_DIMENSION,
};

/// Status codes returned by [`cal_feature_compute`]
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalFeatureStatus {
    Ok = 0,
    NullPointer = -1,
    InvalidInput = -2,
    ComputeFailure = -3,
}

impl From<&FeatureError> for CalFeatureStatus {
    fn from(err: &FeatureError) -> Self {
        match err {
            FeatureError::InvalidInput(_) | FeatureError::InvalidConfig(_) => Self::InvalidInput,
            FeatureError::ComputeFailure(_) | FeatureError::ResourceExhaustion(_) => {
                Self::ComputeFailure
            }
        }
    }
}

/// Opaque handle handed to C callers
pub struct CalFeature {
    extractor: SignalFeatureExtractor,
}

fn create_with(config: ExtractorConfig) -> *mut CalFeature {
    match catch_unwind(move || SignalFeatureExtractor::new(config)) {
        Ok(Ok(extractor)) => Box::into_raw(Box::new(CalFeature { extractor })),
        Ok(Err(e)) => {
            error!("Failed to create feature extractor: {}", e);
            std::ptr::null_mut()
        }
        Err(_) => {
            error!("Panic while creating feature extractor");
            std::ptr::null_mut()
        }
    }
}

/// Create an extractor with the default configuration.
///
/// Returns null if the extractor could not be created.
#[no_mangle]
pub extern "C" fn create_cal_feature() -> *mut CalFeature {
    create_with(ExtractorConfig::default())
}

/// Create an extractor with a sample rate (Hz) and initial FFT scratch
/// capacity (samples), other settings at their defaults.
///
/// Returns null if the configuration is invalid or the scratch buffer
/// could not be reserved.
#[no_mangle]
pub extern "C" fn create_cal_feature_with(
    sample_rate: c_double,
    scratch_capacity: size_t,
) -> *mut CalFeature {
    create_with(ExtractorConfig {
        sample_rate,
        scratch_capacity,
        ..Default::default()
    })
}

/// Destroy a handle returned by [`create_cal_feature`] or
/// [`create_cal_feature_with`]. Null is ignored.
///
/// # Safety
///
/// `obj` must be null or a pointer from [`create_cal_feature`] that has not
/// already been destroyed. It must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn destroy_cal_feature(obj: *mut CalFeature) {
    if obj.is_null() {
        return;
    }
    drop(Box::from_raw(obj));
}

/// Compute features of `len` samples at `data` into `out`.
///
/// On success writes [`FEATURE_DIMENSION`] doubles to `out` and returns 0.
/// `out` is left untouched on failure.
///
/// # Safety
///
/// `obj` must be a live handle. `data` must point to `len` readable doubles
/// (it may be null when `len` is 0). `out` must point to
/// [`FEATURE_DIMENSION`] writable doubles. The handle must not be used
/// from another thread for the duration of the call.
#[no_mangle]
pub unsafe extern "C" fn cal_feature_compute(
    obj: *mut CalFeature,
    data: *const c_double,
    len: size_t,
    out: *mut c_double,
) -> c_int {
    if obj.is_null() || out.is_null() || (data.is_null() && len > 0) {
        warn!("cal_feature_compute called with a null pointer");
        return CalFeatureStatus::NullPointer as c_int;
    }

    let handle = &mut *obj;
    let signal: &[f64] = if len == 0 {
        &[]
    } else {
        std::slice::from_raw_parts(data, len)
    };

    let result = catch_unwind(AssertUnwindSafe(|| handle.extractor.compute(signal)));

    let status = match result {
        Ok(Ok(features)) => {
            let values = features.to_array();
            std::ptr::copy_nonoverlapping(values.as_ptr(), out, FEATURE_DIMENSION);
            CalFeatureStatus::Ok
        }
        Ok(Err(e)) => {
            warn!("Feature computation failed: {}", e);
            CalFeatureStatus::from(&e)
        }
        Err(_) => {
            error!("Panic during feature computation");
            CalFeatureStatus::ComputeFailure
        }
    };

    status as c_int
}

/// Number of doubles written by [`cal_feature_compute`]
#[no_mangle]
pub extern "C" fn cal_feature_dimension() -> size_t {
    FEATURE_DIMENSION
}
