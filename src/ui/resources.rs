//! Bundled image resources

use embedded_graphics::geometry::{OriginDimensions, Size};
use tinybmp::Bmp;

use super::ColorMode;

static LOGO_CANYON_140X20: &[u8] = include_bytes!("../../assets/logo_canyon_140x20.bmp");

/// Resources baked into the firmware image
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResourceId {
    /// 140x20 canyon logo
    LogoCanyon,
}

impl ResourceId {
    fn data(self) -> &'static [u8] {
        match self {
            ResourceId::LogoCanyon => LOGO_CANYON_140X20,
        }
    }
}

/// Decoded bitmap resource
pub struct Bitmap {
    id: ResourceId,
    image: Bmp<'static, ColorMode>,
}

impl Bitmap {
    /// Parse a bundled BMP resource
    pub fn from_resource(id: ResourceId) -> Result<Self, Error> {
        let image = Bmp::from_slice(id.data()).map_err(|_| Error::InvalidBitmap(id))?;
        debug!("Loaded bitmap resource {}", id);
        Ok(Self { id, image })
    }

    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.image.size()
    }

    pub(crate) fn image(&self) -> &Bmp<'static, ColorMode> {
        &self.image
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    InvalidBitmap(ResourceId),
}
