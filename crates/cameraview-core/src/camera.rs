//! Camera availability checks.
//!
//! The host platform is reached through [`CameraCatalog`]; this module only
//! decides what its answers mean.

use serde::{Deserialize, Serialize};

/// Which way a camera sensor points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Facing {
    Back,
    Front,
}

/// System features a device can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraFeature {
    /// A back-facing camera.
    Camera,
    /// A front-facing camera.
    CameraFront,
}

/// Platform camera enumeration.
pub trait CameraCatalog {
    fn has_system_feature(&self, feature: CameraFeature) -> bool;

    fn camera_count(&self) -> usize;

    /// Facing of the camera at `index`, or `None` if its info is unavailable.
    fn camera_facing(&self, index: usize) -> Option<Facing>;
}

/// Whether the device has any usable camera sensor.
pub fn has_cameras(catalog: &impl CameraCatalog) -> bool {
    catalog.has_system_feature(CameraFeature::Camera)
        || catalog.has_system_feature(CameraFeature::CameraFront)
}

/// Whether the device has a camera sensor with the given facing.
pub fn has_camera_facing(catalog: &impl CameraCatalog, facing: Facing) -> bool {
    (0..catalog.camera_count()).any(|index| catalog.camera_facing(index) == Some(facing))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeCatalog {
        features: Vec<CameraFeature>,
        cameras: Vec<Option<Facing>>,
    }

    impl CameraCatalog for FakeCatalog {
        fn has_system_feature(&self, feature: CameraFeature) -> bool {
            self.features.contains(&feature)
        }

        fn camera_count(&self) -> usize {
            self.cameras.len()
        }

        fn camera_facing(&self, index: usize) -> Option<Facing> {
            self.cameras.get(index).copied().flatten()
        }
    }

    #[test]
    fn test_has_cameras() {
        let none = FakeCatalog {
            features: vec![],
            cameras: vec![],
        };
        assert!(!has_cameras(&none));

        let front_only = FakeCatalog {
            features: vec![CameraFeature::CameraFront],
            cameras: vec![],
        };
        assert!(has_cameras(&front_only));

        let back_only = FakeCatalog {
            features: vec![CameraFeature::Camera],
            cameras: vec![],
        };
        assert!(has_cameras(&back_only));
    }

    #[test]
    fn test_has_camera_facing() {
        let catalog = FakeCatalog {
            features: vec![CameraFeature::Camera],
            cameras: vec![Some(Facing::Back)],
        };
        assert!(has_camera_facing(&catalog, Facing::Back));
        assert!(!has_camera_facing(&catalog, Facing::Front));
    }

    #[test]
    fn test_unavailable_camera_info_is_skipped() {
        let catalog = FakeCatalog {
            features: vec![],
            cameras: vec![None, Some(Facing::Front)],
        };
        assert!(has_camera_facing(&catalog, Facing::Front));
        assert!(!has_camera_facing(&catalog, Facing::Back));
    }

    #[test]
    fn test_facing_serde() {
        assert_eq!(serde_json::to_string(&Facing::Front).unwrap(), r#""front""#);
    }
}
