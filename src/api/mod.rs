pub mod images;

pub use images::{
    __path_handle_classify, __path_handle_delete_image, __path_handle_get_classified,
    __path_handle_get_colors, __path_handle_get_image, __path_handle_get_proportions,
    __path_handle_put_image,
};
pub use images::{
    handle_classify, handle_delete_image, handle_get_classified, handle_get_colors,
    handle_get_image, handle_get_proportions, handle_put_image, ClassifyRequest, ColorsResponse,
    IngestQuery, ProportionsResponse,
};
