mod object_image_store;
mod store_factory;

pub use object_image_store::ObjectImageStore;
pub use store_factory::ImageStoreFactory;
