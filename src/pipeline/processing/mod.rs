// Pipeline processing: currency conversion

pub mod transform;
