//! Site sequencing: the ordered, deduplicated sites a transport visits.

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
};

use tracing::warn;

use crate::model::{Delivery, Document, Message, Segment, Site, Transport};

use super::{DeriveError, Result};

/// The sites of a transport in visit order, with per-site lookups.
#[derive(Debug)]
pub struct SiteSequence<'a> {
    sites: Vec<Site>,
    segments: Vec<Cow<'a, Segment>>,
    segments_by_site: HashMap<String, SiteSegments>,
    deliveries_by_site: HashMap<String, SiteDeliveries<'a>>,
    attachments_by_site: HashMap<String, SiteAttachments<'a>>,
}

/// Indexes into [`SiteSequence::segments`] for the segments touching a site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteSegments {
    /// The segment leaving the site.
    pub origin: Option<usize>,

    /// The segment arriving at the site.
    pub destination: Option<usize>,
}

/// Deliveries starting and ending at a site.
#[derive(Debug, Clone, Default)]
pub struct SiteDeliveries<'a> {
    pub origin: Vec<&'a Delivery>,
    pub destination: Vec<&'a Delivery>,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct SiteAttachments<'a> {
    pub documents: Vec<&'a Document>,
    pub messages: Vec<&'a Message>,
}

/// Order the sites of a transport along its segments.
///
/// Segments are walked by `sort_order`, origin before destination; a site is
/// kept the first time its uid is seen, which merges touching segments.
/// A transport with no segment and a single delivery gets an implicit segment
/// spanning that delivery. With no segment and several deliveries there is
/// no path to follow, and sequencing fails.
pub fn sequence_sites(transport: &Transport) -> Result<SiteSequence<'_>> {
    let segments = sorted_segments(transport)?;

    let mut seen = HashSet::new();
    let mut sites = Vec::new();
    let mut segments_by_site: HashMap<String, SiteSegments> = HashMap::new();

    for (i, segment) in segments.iter().enumerate() {
        for site in [&segment.origin, &segment.destination] {
            if seen.insert(site.uid.as_str()) {
                sites.push(site.clone());
            }
        }
        let leaving = segments_by_site
            .entry(segment.origin.uid.clone())
            .or_default();
        leaving.origin.get_or_insert(i);
        let arriving = segments_by_site
            .entry(segment.destination.uid.clone())
            .or_default();
        arriving.destination.get_or_insert(i);
    }

    let mut deliveries_by_site: HashMap<String, SiteDeliveries<'_>> = HashMap::new();
    for delivery in &transport.deliveries {
        for site in [&delivery.origin, &delivery.destination] {
            if !seen.contains(site.uid.as_str()) {
                warn!(
                    transport = %transport.uid,
                    delivery = %delivery.uid,
                    site = %site.uid,
                    "delivery site is not on any segment"
                );
            }
        }
        deliveries_by_site
            .entry(delivery.origin.uid.clone())
            .or_default()
            .origin
            .push(delivery);
        deliveries_by_site
            .entry(delivery.destination.uid.clone())
            .or_default()
            .destination
            .push(delivery);
    }

    let mut attachments_by_site: HashMap<String, SiteAttachments<'_>> = HashMap::new();
    for document in &transport.documents {
        if let Some(site) = &document.site {
            attachments_by_site
                .entry(site.clone())
                .or_default()
                .documents
                .push(document);
        }
    }
    for message in &transport.messages {
        if let Some(site) = &message.site {
            attachments_by_site
                .entry(site.clone())
                .or_default()
                .messages
                .push(message);
        }
    }

    Ok(SiteSequence {
        sites,
        segments,
        segments_by_site,
        deliveries_by_site,
        attachments_by_site,
    })
}

/// Segments sorted by `sort_order`, or the implicit one.
fn sorted_segments(transport: &Transport) -> Result<Vec<Cow<'_, Segment>>> {
    if transport.segments.is_empty() {
        return match transport.deliveries.as_slice() {
            [] => Ok(Vec::new()),
            [delivery] => Ok(vec![Cow::Owned(Segment::implicit(
                delivery.origin.clone(),
                delivery.destination.clone(),
            ))]),
            deliveries => Err(DeriveError::SeveralDeliveriesWithoutSegments {
                transport: transport.uid.clone(),
                deliveries: deliveries.len(),
            }),
        };
    }

    let mut segments: Vec<Cow<'_, Segment>> = transport.segments.iter().map(Cow::Borrowed).collect();
    segments.sort_by_key(|s| s.sort_order);
    Ok(segments)
}

impl<'a> SiteSequence<'a> {
    pub fn sites(&self) -> &[Site] {
        &self.sites
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().map(AsRef::as_ref)
    }

    pub fn segments_at(&self, site_uid: &str) -> SiteSegments {
        self.segments_by_site
            .get(site_uid)
            .copied()
            .unwrap_or_default()
    }

    /// The segment arriving at the site.
    pub fn incoming(&self, site_uid: &str) -> Option<&Segment> {
        self.segments_at(site_uid)
            .destination
            .map(|i| self.segments[i].as_ref())
    }

    /// The segment leaving the site.
    pub fn outgoing(&self, site_uid: &str) -> Option<&Segment> {
        self.segments_at(site_uid)
            .origin
            .map(|i| self.segments[i].as_ref())
    }

    pub fn deliveries_at(&self, site_uid: &str) -> Option<&SiteDeliveries<'a>> {
        self.deliveries_by_site.get(site_uid)
    }

    pub(crate) fn attachments_at(&self, site_uid: &str) -> Option<&SiteAttachments<'a>> {
        self.attachments_by_site.get(site_uid)
    }
}
