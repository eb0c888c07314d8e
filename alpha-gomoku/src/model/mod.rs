pub mod network;
pub mod table;
pub mod uniform;

#[cfg(feature = "torch")]
pub mod conv;

#[cfg(feature = "torch")]
lazy_static! {
    static ref DEVICE: tch::Device = tch::Device::cuda_if_available();
}

/// Try initializing CUDA.
/// Returns whether CUDA is available.
#[cfg(feature = "torch")]
pub fn use_cuda() -> bool {
    tch::maybe_init_cuda();
    tch::Cuda::is_available()
}
