pub mod banner;
pub mod banner_click;
pub mod banner_place;
pub mod campaign;
pub mod place;

pub use banner::Entity as BannerEntity;
pub use banner_click::Entity as BannerClickEntity;
pub use banner_place::Entity as BannerPlaceEntity;
pub use campaign::Entity as CampaignEntity;
pub use place::Entity as PlaceEntity;
