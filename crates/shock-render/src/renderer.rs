// Vulkano instance/device/swapchain setup for the chart window.

use std::sync::Arc;
use vulkano::{
    device::{
        physical::PhysicalDeviceType, Device, DeviceCreateInfo, DeviceExtensions, Queue,
        QueueCreateInfo, QueueFlags,
    },
    image::{view::ImageView, Image, ImageUsage},
    instance::{Instance, InstanceCreateFlags, InstanceCreateInfo},
    swapchain::{self, Surface, Swapchain, SwapchainCreateInfo, SwapchainPresentInfo},
    sync::{self, GpuFuture},
    Validated, VulkanError, VulkanLibrary,
};
use winit::{dpi::LogicalSize, event_loop::ActiveEventLoop, window::Window};

use crate::RenderError;

/// Initial window size in logical pixels.
pub const WINDOW_SIZE: (u32, u32) = (1280, 800);

fn setup<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> RenderError {
    move |e| RenderError::Display(format!("{what}: {e}"))
}

fn views_of(images: &[Arc<Image>]) -> Result<Vec<Arc<ImageView>>, RenderError> {
    images
        .iter()
        .map(|image| ImageView::new_default(image.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(setup("failed to create swapchain image view"))
}

pub struct Renderer {
    pub device: Arc<Device>,
    pub queue: Arc<Queue>,
    pub surface: Arc<Surface>,
    pub swapchain: Arc<Swapchain>,
    pub image_views: Vec<Arc<ImageView>>,
    pub window: Arc<Window>,
    pub recreate_swapchain: bool,
    previous_frame_end: Option<Box<dyn GpuFuture>>,
}

impl Renderer {
    pub fn new(event_loop: &ActiveEventLoop, title: &str) -> Result<Self, RenderError> {
        let library = VulkanLibrary::new().map_err(setup("no Vulkan library found"))?;
        let required_extensions = Surface::required_extensions(event_loop)
            .map_err(setup("failed to get required extensions"))?;
        let instance = Instance::new(
            library,
            InstanceCreateInfo {
                flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
                enabled_extensions: required_extensions,
                ..Default::default()
            },
        )
        .map_err(setup("failed to create Vulkan instance"))?;

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title(title)
                        .with_inner_size(LogicalSize::new(WINDOW_SIZE.0, WINDOW_SIZE.1)),
                )
                .map_err(setup("failed to create window"))?,
        );
        let surface = Surface::from_window(instance.clone(), window.clone())
            .map_err(setup("failed to create surface"))?;

        // Prefer a discrete GPU that can present to the surface.
        let device_extensions = DeviceExtensions {
            khr_swapchain: true,
            ..DeviceExtensions::empty()
        };
        let (physical_device, queue_family_index) = instance
            .enumerate_physical_devices()
            .map_err(setup("failed to enumerate physical devices"))?
            .filter(|p| p.supported_extensions().contains(&device_extensions))
            .filter_map(|p| {
                p.queue_family_properties()
                    .iter()
                    .enumerate()
                    .position(|(i, q)| {
                        q.queue_flags.intersects(QueueFlags::GRAPHICS)
                            && p.surface_support(i as u32, &surface).unwrap_or(false)
                    })
                    .map(|i| (p, i as u32))
            })
            .min_by_key(|(p, _)| match p.properties().device_type {
                PhysicalDeviceType::DiscreteGpu => 0,
                PhysicalDeviceType::IntegratedGpu => 1,
                PhysicalDeviceType::VirtualGpu => 2,
                PhysicalDeviceType::Cpu => 3,
                PhysicalDeviceType::Other => 4,
                _ => 5,
            })
            .ok_or_else(|| RenderError::Display("no suitable physical device found".into()))?;

        println!(
            "Using device: {} (type: {:?})",
            physical_device.properties().device_name,
            physical_device.properties().device_type,
        );

        let (device, mut queues) = Device::new(
            physical_device.clone(),
            DeviceCreateInfo {
                queue_create_infos: vec![QueueCreateInfo {
                    queue_family_index,
                    ..Default::default()
                }],
                enabled_extensions: device_extensions,
                ..Default::default()
            },
        )
        .map_err(setup("failed to create logical device"))?;
        let queue = queues
            .next()
            .ok_or_else(|| RenderError::Display("no queue available".into()))?;

        let surface_capabilities = physical_device
            .surface_capabilities(&surface, Default::default())
            .map_err(setup("failed to query surface capabilities"))?;
        let image_format = physical_device
            .surface_formats(&surface, Default::default())
            .map_err(setup("failed to query surface formats"))?
            .first()
            .map(|(format, _)| *format)
            .ok_or_else(|| RenderError::Display("surface reports no formats".into()))?;
        let composite_alpha = surface_capabilities
            .supported_composite_alpha
            .into_iter()
            .next()
            .ok_or_else(|| RenderError::Display("no composite alpha mode".into()))?;
        let window_size = window.inner_size();
        let (swapchain, images) = Swapchain::new(
            device.clone(),
            surface.clone(),
            SwapchainCreateInfo {
                min_image_count: surface_capabilities.min_image_count.max(2),
                image_format,
                image_extent: [window_size.width, window_size.height],
                image_usage: ImageUsage::COLOR_ATTACHMENT,
                composite_alpha,
                ..Default::default()
            },
        )
        .map_err(setup("failed to create swapchain"))?;

        let image_views = views_of(&images)?;
        let previous_frame_end = Some(sync::now(device.clone()).boxed());

        Ok(Renderer {
            device,
            queue,
            surface,
            swapchain,
            image_views,
            window,
            recreate_swapchain: false,
            previous_frame_end,
        })
    }

    pub fn swapchain_format(&self) -> vulkano::format::Format {
        self.swapchain.image_format()
    }

    pub fn recreate_swapchain(&mut self) -> Result<(), RenderError> {
        let window_size = self.window.inner_size();
        // Minimised: keep the old swapchain until the window has an area again.
        if window_size.width == 0 || window_size.height == 0 {
            return Ok(());
        }
        let (new_swapchain, new_images) = self
            .swapchain
            .recreate(SwapchainCreateInfo {
                image_extent: [window_size.width, window_size.height],
                ..self.swapchain.create_info()
            })
            .map_err(setup("failed to recreate swapchain"))?;

        self.image_views = views_of(&new_images)?;
        self.swapchain = new_swapchain;
        self.recreate_swapchain = false;
        Ok(())
    }

    /// Acquire the next swapchain image. Returns the image index and acquire
    /// future, or `None` if the swapchain is out of date this frame.
    pub fn begin_frame(
        &mut self,
    ) -> Result<Option<(u32, swapchain::SwapchainAcquireFuture)>, RenderError> {
        if let Some(ref mut future) = self.previous_frame_end {
            future.cleanup_finished();
        }

        if self.recreate_swapchain {
            self.recreate_swapchain()?;
        }

        let (image_index, suboptimal, acquire_future) =
            match swapchain::acquire_next_image(self.swapchain.clone(), None)
                .map_err(Validated::unwrap)
            {
                Ok(r) => r,
                Err(VulkanError::OutOfDate) => {
                    self.recreate_swapchain = true;
                    return Ok(None);
                }
                Err(e) => return Err(setup("failed to acquire next image")(e)),
            };
        if suboptimal {
            self.recreate_swapchain = true;
        }
        Ok(Some((image_index, acquire_future)))
    }

    pub fn end_frame(&mut self, after_future: Box<dyn GpuFuture>) {
        self.previous_frame_end = Some(after_future);
    }

    pub fn take_previous_frame_end(&mut self) -> Box<dyn GpuFuture> {
        self.previous_frame_end
            .take()
            .unwrap_or_else(|| sync::now(self.device.clone()).boxed())
    }

    /// Present the rendered image. Flush failures are logged and the frame
    /// is dropped.
    pub fn present(&self, after_future: Box<dyn GpuFuture>, image_index: u32) -> Box<dyn GpuFuture> {
        let future = after_future
            .then_swapchain_present(
                self.queue.clone(),
                SwapchainPresentInfo::swapchain_image_index(self.swapchain.clone(), image_index),
            )
            .then_signal_fence_and_flush();

        match future.map_err(Validated::unwrap) {
            Ok(future) => future.boxed(),
            Err(VulkanError::OutOfDate) => sync::now(self.device.clone()).boxed(),
            Err(e) => {
                eprintln!("failed to flush future: {e}");
                sync::now(self.device.clone()).boxed()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_names_the_step() {
        let err = setup("failed to create device")("no queue family");
        assert!(matches!(err, RenderError::Display(_)));
        assert_eq!(
            err.to_string(),
            "display failed: failed to create device: no queue family"
        );
    }

    #[test]
    fn test_views_follow_swapchain_images() {
        // No images, no views; nothing touches the GPU.
        assert!(views_of(&[]).unwrap().is_empty());
    }
}
