//! `BlazeFace` short-range face detector.
//!
//! Front-camera variant: 128x128 input, 896 anchors over a 16x16 and an 8x8
//! grid, six keypoints per face. Weights follow hollance/BlazeFace-PyTorch
//! with BatchNorm folded into the convolution biases.

// Allow common ML code patterns
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

use anyhow::{Context, Result};
use candle_core::{DType, Device, Module, Tensor};
use candle_nn::{conv2d, Conv2d, Conv2dConfig, VarBuilder};

use crate::domain::{Face, FaceBox, Keypoint, Landmark};

/// Input image size for `BlazeFace`.
pub const INPUT_SIZE: usize = 128;

/// Default minimum sigmoid score for a raw detection to be kept.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.75;

/// Overlap above which the weaker of two detections is suppressed.
const NMS_IOU_THRESHOLD: f32 = 0.3;

/// Regressor values per anchor: box (4) plus six `(x, y)` keypoints.
const REGRESSION_VALUES: usize = 16;

/// Order in which the regressor emits keypoints.
pub const KEYPOINT_ORDER: [Landmark; 6] = [
    Landmark::RightEye,
    Landmark::LeftEye,
    Landmark::NoseTip,
    Landmark::Mouth,
    Landmark::RightEar,
    Landmark::LeftEar,
];

/// `(in_channels, out_channels, stride)` of the blocks feeding the 16x16 head.
const BACKBONE_16: [(usize, usize, usize); 11] = [
    (24, 24, 1),
    (24, 28, 1),
    (28, 32, 2),
    (32, 36, 1),
    (36, 42, 1),
    (42, 48, 2),
    (48, 56, 1),
    (56, 64, 1),
    (64, 72, 1),
    (72, 80, 1),
    (80, 88, 1),
];

/// Blocks feeding the 8x8 head.
const BACKBONE_8: [(usize, usize, usize); 5] = [
    (88, 96, 2),
    (96, 96, 1),
    (96, 96, 1),
    (96, 96, 1),
    (96, 96, 1),
];

/// `(grid size, anchors per cell)` for each head, finest first.
const ANCHOR_GRIDS: [(usize, usize); 2] = [(16, 2), (8, 6)];

/// A detection in normalised `[0, 1]` image coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// `[x_min, y_min, x_max, y_max]`
    pub bbox: [f32; 4],
    pub score: f32,
    /// `[x, y]` per entry of [`KEYPOINT_ORDER`].
    pub keypoints: [[f32; 2]; 6],
}

impl RawDetection {
    /// Scales the detection into the pixel space of a `width` x `height` image.
    #[must_use]
    pub fn to_face(&self, width: u32, height: u32) -> Face {
        let w = f64::from(width);
        let h = f64::from(height);
        let [x0, y0, x1, y1] = self.bbox.map(f64::from);

        let keypoints = KEYPOINT_ORDER
            .iter()
            .zip(&self.keypoints)
            .map(|(&landmark, &[x, y])| Keypoint::new(landmark, f64::from(x) * w, f64::from(y) * h))
            .collect();

        Face {
            bbox: FaceBox::new(x0 * w, y0 * h, (x1 - x0) * w, (y1 - y0) * h),
            keypoints,
            score: self.score,
        }
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

/// Depthwise-separable residual block.
struct BlazeBlock {
    depthwise: Conv2d,
    pointwise: Conv2d,
    stride: usize,
    extra_channels: usize,
}

impl BlazeBlock {
    fn new((in_c, out_c, stride): (usize, usize, usize), vb: &VarBuilder) -> Result<Self> {
        // Stride-2 blocks pad explicitly in `forward`.
        let padding = if stride == 2 { 0 } else { 1 };
        let depthwise = conv2d(
            in_c,
            in_c,
            3,
            Conv2dConfig {
                stride,
                padding,
                groups: in_c,
                ..Conv2dConfig::default()
            },
            vb.pp("depthwise"),
        )?;
        let pointwise = conv2d(in_c, out_c, 1, Conv2dConfig::default(), vb.pp("pointwise"))?;

        Ok(Self {
            depthwise,
            pointwise,
            stride,
            extra_channels: out_c.saturating_sub(in_c),
        })
    }
}

impl Module for BlazeBlock {
    fn forward(&self, x: &Tensor) -> candle_core::Result<Tensor> {
        let (branch_in, shortcut) = if self.stride == 2 {
            (
                x.pad_with_zeros(2, 0, 2)?.pad_with_zeros(3, 0, 2)?,
                x.max_pool2d(2)?,
            )
        } else {
            (x.clone(), x.clone())
        };

        let h = self.depthwise.forward(&branch_in)?.relu()?;
        let h = self.pointwise.forward(&h)?;

        let shortcut = if self.extra_channels > 0 {
            shortcut.pad_with_zeros(1, 0, self.extra_channels)?
        } else {
            shortcut
        };

        (h + shortcut)?.relu()
    }
}

/// Classifier and regressor convolutions for one feature map.
struct Head {
    classifier: Conv2d,
    regressor: Conv2d,
}

impl Head {
    fn new(channels: usize, anchors_per_cell: usize, grid: usize, vb: &VarBuilder) -> Result<Self> {
        Ok(Self {
            classifier: conv2d(
                channels,
                anchors_per_cell,
                1,
                Conv2dConfig::default(),
                vb.pp(format!("classifier_{grid}")),
            )?,
            regressor: conv2d(
                channels,
                anchors_per_cell * REGRESSION_VALUES,
                1,
                Conv2dConfig::default(),
                vb.pp(format!("regressor_{grid}")),
            )?,
        })
    }

    /// Returns `(scores, boxes)` shaped `(1, anchors, 1)` and `(1, anchors, 16)`.
    fn forward(&self, features: &Tensor) -> Result<(Tensor, Tensor)> {
        let scores = self.classifier.forward(features)?.permute((0, 2, 3, 1))?;
        let boxes = self.regressor.forward(features)?.permute((0, 2, 3, 1))?;
        let anchors = scores.elem_count();
        Ok((
            scores.reshape((1, anchors, 1))?,
            boxes.reshape((1, anchors, REGRESSION_VALUES))?,
        ))
    }
}

/// `BlazeFace` face detection network.
pub struct BlazeFace {
    conv0: Conv2d,
    backbone_16: Vec<BlazeBlock>,
    backbone_8: Vec<BlazeBlock>,
    head_16: Head,
    head_8: Head,
    /// Anchor centres in normalised coordinates, matching output order.
    anchors: Vec<[f32; 2]>,
    device: Device,
}

impl BlazeFace {
    /// Builds the network from weights.
    ///
    /// # Errors
    ///
    /// Returns an error if a tensor is missing or has the wrong shape.
    #[allow(clippy::needless_pass_by_value)]
    pub fn new(vb: VarBuilder) -> Result<Self> {
        let device = vb.device().clone();

        let conv0 = conv2d(
            3,
            24,
            5,
            Conv2dConfig {
                stride: 2,
                ..Conv2dConfig::default()
            },
            vb.pp("conv0"),
        )?;

        let backbone_16 = BACKBONE_16
            .iter()
            .enumerate()
            .map(|(i, &spec)| BlazeBlock::new(spec, &vb.pp(format!("backbone1.{i}"))))
            .collect::<Result<Vec<_>>>()?;
        let backbone_8 = BACKBONE_8
            .iter()
            .enumerate()
            .map(|(i, &spec)| BlazeBlock::new(spec, &vb.pp(format!("backbone2.{i}"))))
            .collect::<Result<Vec<_>>>()?;

        let [(grid_16, per_cell_16), (grid_8, per_cell_8)] = ANCHOR_GRIDS;
        let head_16 = Head::new(88, per_cell_16, grid_16, &vb)?;
        let head_8 = Head::new(96, per_cell_8, grid_8, &vb)?;

        Ok(Self {
            conv0,
            backbone_16,
            backbone_8,
            head_16,
            head_8,
            anchors: anchor_centres(),
            device,
        })
    }

    /// Resizes to 128x128 and normalises to `[-1, 1]`, NCHW.
    ///
    /// # Errors
    ///
    /// Returns an error if tensor creation fails.
    pub fn preprocess(&self, image: &image::DynamicImage) -> Result<Tensor> {
        let side = INPUT_SIZE as u32;
        let rgb = image
            .resize_exact(side, side, image::imageops::FilterType::Triangle)
            .to_rgb8();

        let data: Vec<f32> = rgb
            .into_raw()
            .into_iter()
            .map(|v| f32::from(v) / 127.5 - 1.0)
            .collect();

        Tensor::from_vec(data, (1, INPUT_SIZE, INPUT_SIZE, 3), &self.device)?
            .permute((0, 3, 1, 2))?
            .to_dtype(DType::F32)
            .context("Failed to preprocess image")
    }

    fn forward(&self, x: &Tensor) -> Result<(Tensor, Tensor)> {
        let x = x.pad_with_zeros(2, 1, 2)?.pad_with_zeros(3, 1, 2)?;
        let mut h = self.conv0.forward(&x)?.relu()?;

        for block in &self.backbone_16 {
            h = block.forward(&h)?;
        }
        let (scores_16, boxes_16) = self.head_16.forward(&h)?;

        for block in &self.backbone_8 {
            h = block.forward(&h)?;
        }
        let (scores_8, boxes_8) = self.head_8.forward(&h)?;

        Ok((
            Tensor::cat(&[scores_16, scores_8], 1)?,
            Tensor::cat(&[boxes_16, boxes_8], 1)?,
        ))
    }

    /// Detects faces scoring at least `score_threshold`, strongest first.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    pub fn detect(
        &self,
        image: &image::DynamicImage,
        score_threshold: f32,
    ) -> Result<Vec<RawDetection>> {
        let input = self.preprocess(image)?;
        let (scores, boxes) = self.forward(&input)?;
        let scores = scores.squeeze(0)?.to_vec2::<f32>()?;
        let boxes = boxes.squeeze(0)?.to_vec2::<f32>()?;

        let candidates = decode(&self.anchors, &scores, &boxes, score_threshold);
        Ok(suppress_overlaps(candidates))
    }
}

/// Anchor centres for every grid cell, in network output order.
fn anchor_centres() -> Vec<[f32; 2]> {
    ANCHOR_GRIDS
        .iter()
        .flat_map(|&(grid, per_cell)| {
            let step = 1.0 / grid as f32;
            (0..grid).flat_map(move |y| {
                (0..grid).flat_map(move |x| {
                    let centre = [(x as f32 + 0.5) * step, (y as f32 + 0.5) * step];
                    std::iter::repeat(centre).take(per_cell)
                })
            })
        })
        .collect()
}

/// Turns raw head outputs into thresholded detections.
fn decode(
    anchors: &[[f32; 2]],
    scores: &[Vec<f32>],
    boxes: &[Vec<f32>],
    threshold: f32,
) -> Vec<RawDetection> {
    let scale = INPUT_SIZE as f32;

    anchors
        .iter()
        .zip(scores)
        .zip(boxes)
        .filter_map(|((&[ax, ay], score), reg)| {
            let score = sigmoid(score[0]);
            if score < threshold {
                return None;
            }

            let cx = ax + reg[0] / scale;
            let cy = ay + reg[1] / scale;
            let half_w = reg[2] / scale / 2.0;
            let half_h = reg[3] / scale / 2.0;

            let mut keypoints = [[0.0f32; 2]; 6];
            for (k, kp) in keypoints.iter_mut().enumerate() {
                *kp = [
                    (ax + reg[4 + 2 * k] / scale).clamp(0.0, 1.0),
                    (ay + reg[5 + 2 * k] / scale).clamp(0.0, 1.0),
                ];
            }

            Some(RawDetection {
                bbox: [
                    (cx - half_w).clamp(0.0, 1.0),
                    (cy - half_h).clamp(0.0, 1.0),
                    (cx + half_w).clamp(0.0, 1.0),
                    (cy + half_h).clamp(0.0, 1.0),
                ],
                score,
                keypoints,
            })
        })
        .collect()
}

/// Greedy non-maximum suppression, strongest detection first.
fn suppress_overlaps(mut candidates: Vec<RawDetection>) -> Vec<RawDetection> {
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut kept: Vec<RawDetection> = Vec::new();
    for candidate in candidates {
        if kept
            .iter()
            .all(|k| iou(&k.bbox, &candidate.bbox) < NMS_IOU_THRESHOLD)
        {
            kept.push(candidate);
        }
    }
    kept
}

/// Intersection over union of two corner-format boxes.
fn iou(a: &[f32; 4], b: &[f32; 4]) -> f32 {
    let iw = (a[2].min(b[2]) - a[0].max(b[0])).max(0.0);
    let ih = (a[3].min(b[3]) - a[1].max(b[1])).max(0.0);
    let intersection = iw * ih;
    let union = (a[2] - a[0]) * (a[3] - a[1]) + (b[2] - b[0]) * (b[3] - b[1]) - intersection;

    if union > 0.0 {
        intersection / union
    } else {
        0.0
    }
}
