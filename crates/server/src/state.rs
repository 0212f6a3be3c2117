use std::sync::Arc;

use service::ProductService;

use crate::interceptor::InterceptorChain;
use crate::views::Views;

/// Everything a request needs, built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductService,
    pub views: Arc<Views>,
    pub interceptors: Arc<InterceptorChain>,
}

impl AppState {
    pub fn new(products: ProductService, views: Views, interceptors: InterceptorChain) -> Self {
        Self { products, views: Arc::new(views), interceptors: Arc::new(interceptors) }
    }
}
