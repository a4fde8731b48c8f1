// Domain layer: request, input and result types shared by the calculator,
// the report renderers and the web handlers.

pub mod model;
